// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成确定性的库存表 CSV 测试数据集
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use anyhow::{Context, Result};
use csv::Writer;
use std::fs;
use std::path::Path;

const OUTPUT_DIR: &str = "tests/fixtures/datasets";

// CSV 表头（与导入器必需栏位一致）
const CSV_HEADER: &[&str] = &[
    "Article",
    "Article Description",
    "OM",
    "RP Type",
    "Site",
    "MOQ",
    "SaSa Net Stock",
    "Pending Received",
    "Safety Stock",
    "Last Month Sold Qty",
    "MTD Sold Qty",
];

const SITES: &[(&str, &str)] = &[
    ("HA01", "OM1"),
    ("HA02", "OM1"),
    ("HA03", "OM2"),
    ("HB01", "OM1"),
    ("HB02", "OM2"),
    ("HC01", "OM2"),
    ("HD01", "OM1"),
    ("HD02", "OM2"),
];

const DESCRIPTIONS: &[&str] = &["棉质T恤", "牛仔裤", "运动外套", "针织帽", "帆布鞋"];

// 库存记录结构
struct InventoryRow {
    article: String,
    description: String,
    om: String,
    rp_type: String,
    site: String,
    moq: i64,
    net_stock: i64,
    pending_received: i64,
    safety_stock: i64,
    last_month_sold: i64,
    mtd_sold: i64,
}

impl InventoryRow {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.article.clone(),
            self.description.clone(),
            self.om.clone(),
            self.rp_type.clone(),
            self.site.clone(),
            self.moq.to_string(),
            self.net_stock.to_string(),
            self.pending_received.to_string(),
            self.safety_stock.to_string(),
            self.last_month_sold.to_string(),
            self.mtd_sold.to_string(),
        ]
    }
}

// 按货号序号与店铺序号生成记录（同一输入恒得同一输出）
fn generate_record(article_index: usize, site_index: usize) -> InventoryRow {
    let (site, om) = SITES[site_index];
    let seed = article_index * 31 + site_index * 7;

    // 约 1/5 的店铺为 ND
    let rp_type = if seed % 5 == 0 { "ND" } else { "RF" };

    // 约 1/4 的店铺零库存,制造缺货需求
    let net_stock = if seed % 4 == 1 { 0 } else { (seed % 37) as i64 };

    InventoryRow {
        article: format!("1080101{:05}", article_index + 1),
        description: DESCRIPTIONS[article_index % DESCRIPTIONS.len()].to_string(),
        om: om.to_string(),
        rp_type: rp_type.to_string(),
        site: site.to_string(),
        moq: (seed % 4) as i64,
        net_stock,
        pending_received: if seed % 6 == 0 { 2 } else { 0 },
        safety_stock: 3 + (seed % 9) as i64,
        last_month_sold: (seed % 13) as i64,
        mtd_sold: (seed % 5) as i64,
    }
}

fn write_dataset(name: &str, rows: &[InventoryRow]) -> Result<()> {
    let path = Path::new(OUTPUT_DIR).join(name);
    let mut wtr = Writer::from_path(&path)
        .with_context(|| format!("无法创建文件: {}", path.display()))?;
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record(row.to_row())?;
    }
    wtr.flush()?;
    println!("✓ {} ({} 行)", path.display(), rows.len());
    Ok(())
}

// 1. 常规数据集（20 个货号 × 全部店铺）
fn generate_normal_data() -> Result<()> {
    let rows: Vec<InventoryRow> = (0..20)
        .flat_map(|a| (0..SITES.len()).map(move |s| generate_record(a, s)))
        .collect();
    write_dataset("inventory_normal.csv", &rows)
}

// 2. 大数据集（500 个货号）
fn generate_large_dataset() -> Result<()> {
    let rows: Vec<InventoryRow> = (0..500)
        .flat_map(|a| (0..SITES.len()).map(move |s| generate_record(a, s)))
        .collect();
    write_dataset("inventory_large.csv", &rows)
}

// 3. 数据质量问题（负库存 / 非法 RP Type / 重复货号店铺）
fn generate_dq_issues() -> Result<()> {
    let mut rows: Vec<InventoryRow> = (0..SITES.len()).map(|s| generate_record(0, s)).collect();

    rows[1].net_stock = -5;
    rows[2].rp_type = "XX".to_string();
    let duplicate = generate_record(0, 3);
    rows.push(InventoryRow {
        net_stock: duplicate.net_stock + 1,
        ..duplicate
    });

    write_dataset("inventory_dq_issues.csv", &rows)
}

fn main() -> Result<()> {
    println!("开始生成测试数据集...");

    fs::create_dir_all(OUTPUT_DIR).with_context(|| format!("无法创建目录: {}", OUTPUT_DIR))?;

    generate_normal_data()?;
    generate_large_dataset()?;
    generate_dq_issues()?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}
