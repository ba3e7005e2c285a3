//! 演示如何在 library 模式下使用 bwt-search。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_search
//! ```

use bwt_search::index::{fm::FmIndex, invert, IndexOpt, OccMode};
use bwt_search::search::batch;
use bwt_search::util::alphabet;

fn main() -> bwt_search::Result<()> {
    // 1. 参考序列，末尾补哨兵
    let reference = b"ACGTACGTAGCTGATCGTAGCTAGCTAGCTGATCGTAGCTAGCTAGCTGAT";
    let text = alphabet::terminated(reference, b'$');
    println!("参考序列: {}", String::from_utf8_lossy(&text));
    println!("参考长度: {}", text.len());

    // 2. 构建 FM 索引（采样 Occ，步长 5）
    let fm = FmIndex::build(&text, &IndexOpt::default())?;
    println!("BWT: {}", String::from_utf8_lossy(&fm.bwt_string()));
    println!(
        "Occ 计数: {}，SA 采样行: {}/{}",
        fm.occ_table().sample_count(),
        fm.partial_sa().len(),
        fm.len()
    );

    // 3. 精确匹配
    let pattern = b"GCTGATCGTAG";
    let positions = fm.exact_match(pattern)?;
    println!("\n精确匹配 '{}': {:?}", String::from_utf8_lossy(pattern), positions);
    println!("出现次数: {}", fm.count(b"GCTAG")?);

    // 4. 近似匹配（至多 2 个错配）
    let pattern = b"GCTTATCGTAG";
    for hit in fm.approximate_hits(pattern, 2)? {
        println!(
            "  pos={} mismatches={} ref='{}'",
            hit.position,
            hit.mismatches,
            String::from_utf8_lossy(&hit.matched)
        );
    }

    // 5. 完整 Occ 表得到相同结果
    let full = FmIndex::build(&text, &IndexOpt { occ_mode: OccMode::Full, ..IndexOpt::default() })?;
    assert_eq!(full.approximate_match(pattern, 2)?, fm.approximate_match(pattern, 2)?);

    // 6. 批量查询
    let patterns = ["ACGT", "GCTAG", "TTTT"];
    for h in batch::exact_match_batch(&fm, &patterns)? {
        println!("{}: {:?}", String::from_utf8_lossy(&h.pattern), h.positions);
    }

    // 7. BWT 还原
    let decoded = invert::decode(&fm.bwt_string(), b'$')?;
    assert_eq!(decoded, text);
    println!("\n还原成功：{}", String::from_utf8_lossy(&fm.invert()?));
    Ok(())
}
