use super::*;
use crate::config::AllocationConfig;
use crate::domain::inventory::InventoryRecord;
use crate::domain::transfer::TransferRecommendation;
use crate::domain::types::{NeedType, SiteType, TransferMode, TransferType};
use crate::engine::classifier::Classifier;

// ==========================================
// 测试辅助函数
// ==========================================

fn create_test_record(
    site: &str,
    om: &str,
    site_type: SiteType,
    net: i64,
    safety: i64,
    sold: i64,
) -> InventoryRecord {
    InventoryRecord {
        article: "108010170001".to_string(),
        description: "棉质T恤".to_string(),
        om: om.to_string(),
        site: site.to_string(),
        site_type,
        moq: 0,
        net_stock: net,
        pending_received: 0,
        safety_stock: safety,
        last_month_sold: sold,
        mtd_sold: 0,
    }
}

fn create_test_recommendation(site: &str, original: i64, qty: i64) -> TransferRecommendation {
    TransferRecommendation {
        article: "108010170001".to_string(),
        receive_article: "108010170001".to_string(),
        product_desc: String::new(),
        transfer_om: "OM1".to_string(),
        transfer_site: site.to_string(),
        receive_om: "OM1".to_string(),
        receive_site: "HA99".to_string(),
        transfer_qty: qty,
        transfer_site_original_stock: original,
        transfer_site_after_stock: original - qty,
        transfer_site_safety_stock: 0,
        transfer_site_moq: 0,
        transfer_site_last_month_sold: 0,
        transfer_site_mtd_sold: 0,
        receive_site_last_month_sold: 0,
        receive_site_mtd_sold: 0,
        receive_original_stock: 0,
        transfer_type: TransferType::NdTransfer,
        need_type: NeedType::UrgentShortage,
        remark: String::new(),
        notes: "ND转出 → 紧急缺货".to_string(),
    }
}

fn run(mode: TransferMode, records: &[InventoryRecord]) -> Vec<TransferRecommendation> {
    let config = AllocationConfig::default();
    let classifier = Classifier::new(config.clone());
    let matcher = Matcher::new(config);
    let indices: Vec<usize> = (0..records.len()).collect();
    let (candidates, needs) = classifier.classify_article(mode, records, &indices);
    matcher.match_article(mode, records, candidates, needs)
}

// ==========================================
// 优先级表
// ==========================================

#[test]
fn test_priority_table_order() {
    assert_eq!(MATCHING_PRIORITY.len(), 8);
    assert_eq!(
        MATCHING_PRIORITY[0],
        (TransferType::NdTransfer, NeedType::UrgentShortage)
    );
    assert_eq!(
        MATCHING_PRIORITY[7],
        (TransferType::CComplete, NeedType::PotentialShortage)
    );
    // 转出类型序号单调不减,同类型内紧急在前
    for pair in MATCHING_PRIORITY.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!((a.0.rank(), a.1.rank()) < (b.0.rank(), b.1.rank()));
    }
}

// ==========================================
// 贪心匹配
// ==========================================

#[test]
fn test_nd_serves_urgent_in_input_order() {
    let records = vec![
        create_test_record("HB01", "OM1", SiteType::Nd, 5, 0, 0),
        create_test_record("HA01", "OM1", SiteType::Rf, 0, 3, 4),
        create_test_record("HD01", "OM2", SiteType::Rf, 0, 4, 2),
    ];

    let recs = run(TransferMode::A, &records);

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].receive_site, "HA01");
    assert_eq!(recs[0].transfer_qty, 3);
    assert_eq!(recs[0].transfer_site_after_stock, 2);
    assert_eq!(recs[1].receive_site, "HD01");
    assert_eq!(recs[1].transfer_qty, 2);
    assert_eq!(recs[1].transfer_site_after_stock, 0);
    assert!(recs.iter().all(|r| r.transfer_type == TransferType::NdTransfer));
}

#[test]
fn test_urgent_served_before_potential() {
    let records = vec![
        create_test_record("HB01", "OM1", SiteType::Nd, 4, 0, 0),
        create_test_record("HA02", "OM1", SiteType::Rf, 1, 4, 9),
        create_test_record("HA01", "OM1", SiteType::Rf, 0, 3, 2),
    ];

    let recs = run(TransferMode::A, &records);

    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].receive_site, "HA01");
    assert_eq!(recs[0].need_type, NeedType::UrgentShortage);
    assert_eq!(recs[0].transfer_qty, 3);
    assert_eq!(recs[1].receive_site, "HA02");
    assert_eq!(recs[1].need_type, NeedType::PotentialShortage);
    assert_eq!(recs[1].transfer_qty, 1);
}

#[test]
fn test_hd_never_sends_to_feeder() {
    let records = vec![
        create_test_record("HD01", "OM1", SiteType::Nd, 5, 0, 0),
        create_test_record("HA01", "OM1", SiteType::Rf, 0, 3, 1),
    ];
    assert!(run(TransferMode::A, &records).is_empty());
}

#[test]
fn test_feeder_cross_om_skipped() {
    let records = vec![
        create_test_record("HB01", "OM2", SiteType::Nd, 5, 0, 0),
        create_test_record("HA01", "OM1", SiteType::Rf, 0, 3, 1),
    ];
    assert!(run(TransferMode::B, &records).is_empty());
}

#[test]
fn test_mode_c_same_om_only() {
    let records = vec![
        create_test_record("HA01", "OM1", SiteType::Rf, 4, 2, 0),
        create_test_record("HA02", "OM1", SiteType::Rf, 0, 2, 5),
        create_test_record("HD01", "OM2", SiteType::Rf, 0, 3, 6),
    ];

    let recs = run(TransferMode::C, &records);

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].transfer_site, "HA01");
    assert_eq!(recs[0].receive_site, "HA02");
    assert_eq!(recs[0].transfer_type, TransferType::CComplete);
    assert_eq!(recs[0].transfer_qty, 2);
    assert_eq!(recs[0].transfer_om, recs[0].receive_om);
}

#[test]
fn test_no_needs_no_recommendations() {
    let records = vec![create_test_record("HB01", "OM1", SiteType::Nd, 5, 0, 0)];
    assert!(run(TransferMode::A, &records).is_empty());
}

#[test]
fn test_remark_and_notes_text() {
    let records = vec![
        create_test_record("HB01", "OM1", SiteType::Nd, 5, 0, 0),
        create_test_record("HA01", "OM1", SiteType::Rf, 0, 3, 4),
        create_test_record("HD01", "OM2", SiteType::Rf, 0, 2, 2),
    ];

    let recs = run(TransferMode::A, &records);

    assert_eq!(recs[0].remark, "ND转出 → HA店铺：标准转出");
    assert!(recs[0].notes.starts_with("ND转出 → 紧急缺货 | "));
    assert!(recs[0].notes.contains("需求数量 = 安全库存 3"));
    assert!(recs[0].notes.contains("标准调货"));

    // ND 备注按转出方判定，优先级说明看任一端
    assert_eq!(recs[1].remark, "ND转出 → HD店铺：标准转出");
    assert!(recs[1].notes.ends_with("澳门优先：HD店铺为澳门地区重点支援对象，优先考虑其库存需求和销售特点"));
    assert_eq!(recs[1].product_desc, "棉质T恤");
}

#[test]
fn test_remark_hd_priority_by_sender_or_receiver() {
    let records = vec![
        create_test_record("HD01", "OM1", SiteType::Nd, 4, 0, 0),
        create_test_record("KL01", "OM2", SiteType::Rf, 0, 3, 2),
    ];
    let recs = run(TransferMode::A, &records);

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].transfer_qty, 3);
    assert_eq!(recs[0].remark, "ND转出 → HD店铺：澳门优先，HD店铺为主要目标");
    assert!(recs[0].notes.contains("澳门优先：HD店铺为澳门地区重点支援对象"));

    let records = vec![
        create_test_record("HA01", "OM1", SiteType::Rf, 10, 2, 0),
        create_test_record("HD02", "OM2", SiteType::Rf, 0, 3, 5),
    ];
    let recs = run(TransferMode::A, &records);

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].transfer_type, TransferType::RfSurplus);
    assert_eq!(recs[0].remark, "RF过剩转出 → HD店铺：澳门优先，库存充足转出");
    assert!(recs[0].notes.contains("澳门优先"));
}

// ==========================================
// 数量提升
// ==========================================

#[test]
fn test_bump_accepted() {
    let matcher = Matcher::new(AllocationConfig::default());
    let mut recs = vec![create_test_recommendation("HB01", 5, 1)];

    let bumped = matcher.apply_quantity_bump(&mut recs);

    assert_eq!(bumped, 1);
    assert_eq!(recs[0].transfer_qty, 2);
    assert_eq!(recs[0].transfer_site_after_stock, 3);
    assert!(recs[0].notes.ends_with("数量提升：1 → 2"));
}

#[test]
fn test_bump_refused_when_stock_exhausted() {
    let matcher = Matcher::new(AllocationConfig::default());
    let mut recs = vec![create_test_recommendation("HB01", 1, 1)];

    assert_eq!(matcher.apply_quantity_bump(&mut recs), 0);
    assert_eq!(recs[0].transfer_qty, 1);
    assert_eq!(recs[0].transfer_site_after_stock, 0);
}

#[test]
fn test_bump_counts_committed_from_same_site() {
    let matcher = Matcher::new(AllocationConfig::default());
    let mut recs = vec![
        create_test_recommendation("HB01", 3, 1),
        create_test_recommendation("HB01", 3, 1),
        create_test_recommendation("HB02", 3, 1),
    ];

    assert_eq!(matcher.apply_quantity_bump(&mut recs), 2);

    assert_eq!(recs[0].transfer_qty, 2);
    assert_eq!(recs[1].transfer_qty, 1);
    assert_eq!(recs[2].transfer_qty, 2);
    // 转出后库存按累计重算
    assert_eq!(recs[0].transfer_site_after_stock, 1);
    assert_eq!(recs[1].transfer_site_after_stock, 0);
    assert_eq!(recs[2].transfer_site_after_stock, 1);
}

#[test]
fn test_bump_disabled() {
    let config = AllocationConfig {
        quantity_bump_enabled: false,
        ..AllocationConfig::default()
    };
    let matcher = Matcher::new(config);
    let mut recs = vec![create_test_recommendation("HB01", 5, 1)];

    assert_eq!(matcher.apply_quantity_bump(&mut recs), 0);
    assert_eq!(recs[0].transfer_qty, 1);
    assert_eq!(recs[0].transfer_site_after_stock, 4);
}

#[test]
fn test_bump_after_matching_scenario() {
    let records = vec![
        create_test_record("HB01", "OM1", SiteType::Nd, 4, 0, 0),
        create_test_record("HA02", "OM1", SiteType::Rf, 1, 4, 9),
        create_test_record("HA01", "OM1", SiteType::Rf, 0, 3, 2),
    ];
    let mut recs = run(TransferMode::A, &records);

    // HB01 已承诺 4 件,无余量提升
    let matcher = Matcher::new(AllocationConfig::default());
    assert_eq!(matcher.apply_quantity_bump(&mut recs), 0);
    assert_eq!(recs[1].transfer_qty, 1);
    assert_eq!(recs[1].transfer_site_after_stock, 0);
}

#[test]
fn test_recompute_after_stock() {
    let mut recs = vec![
        create_test_recommendation("HB01", 10, 3),
        create_test_recommendation("HB01", 10, 4),
    ];
    recs[1].transfer_site_after_stock = 999;
    recompute_after_stock(&mut recs);
    assert_eq!(recs[0].transfer_site_after_stock, 7);
    assert_eq!(recs[1].transfer_site_after_stock, 3);
}
