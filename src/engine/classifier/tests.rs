use super::*;
use crate::config::AllocationConfig;
use crate::domain::inventory::InventoryRecord;
use crate::domain::types::{NeedType, SiteType, TransferMode, TransferType};

// ==========================================
// 测试辅助函数
// ==========================================

fn rec(
    site: &str,
    om: &str,
    site_type: SiteType,
    net: i64,
    pending: i64,
    safety: i64,
    moq: i64,
    sold: i64,
) -> InventoryRecord {
    InventoryRecord {
        article: "108010170001".to_string(),
        description: "测试货品".to_string(),
        om: om.to_string(),
        site: site.to_string(),
        site_type,
        moq,
        net_stock: net,
        pending_received: pending,
        safety_stock: safety,
        last_month_sold: sold,
        mtd_sold: 0,
    }
}

fn classify(
    mode: TransferMode,
    records: &[InventoryRecord],
) -> (Vec<crate::domain::transfer::OutboundCandidate>, Vec<crate::domain::transfer::InboundNeed>) {
    let classifier = Classifier::new(AllocationConfig::default());
    let indices: Vec<usize> = (0..records.len()).collect();
    classifier.classify_article(mode, records, &indices)
}

// ==========================================
// A 模式
// ==========================================

#[test]
fn test_mode_a_surplus_and_urgent() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 10, 0, 4, 0, 2),
        rec("HA02", "OM1", SiteType::Rf, 0, 0, 5, 0, 10),
    ];

    let (candidates, needs) = classify(TransferMode::A, &records);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].site, "HA01");
    assert_eq!(candidates[0].transfer_type, TransferType::RfSurplus);
    // min(10-4, max(10×0.4, 2)) = 4
    assert_eq!(candidates[0].available, 4);
    assert_eq!(candidates[0].original_stock, 10);
    assert!(!candidates[0].same_om_only);

    assert_eq!(needs.len(), 1);
    assert_eq!(needs[0].site, "HA02");
    assert_eq!(needs[0].need_type, NeedType::UrgentShortage);
    assert_eq!(needs[0].demand, 5);
}

#[test]
fn test_mode_a_min_shipment_floor() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 3, 0, 0, 0, 0),
        rec("HA02", "OM1", SiteType::Rf, 9, 0, 0, 0, 8),
    ];

    let (candidates, _) = classify(TransferMode::A, &records);

    // 3 × 0.4 = 1.2，按最少出货 2 件
    let ha01 = candidates.iter().find(|c| c.site == "HA01").unwrap();
    assert_eq!(ha01.available, 2);
}

#[test]
fn test_mode_a_capped_at_net_stock() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 1, 9, 0, 0, 0),
        rec("HA02", "OM1", SiteType::Rf, 0, 0, 0, 0, 3),
    ];

    let (candidates, _) = classify(TransferMode::A, &records);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].available, 1);
}

#[test]
fn test_mode_a_max_seller_is_not_a_candidate() {
    let records = vec![rec("HA01", "OM1", SiteType::Rf, 50, 0, 4, 0, 2)];
    let (candidates, needs) = classify(TransferMode::A, &records);
    assert!(candidates.is_empty());
    assert!(needs.is_empty());
}

// ==========================================
// B 模式
// ==========================================

#[test]
fn test_mode_b_enhanced_when_below_safety() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 10, 0, 8, 2, 1),
        rec("HA02", "OM1", SiteType::Rf, 0, 0, 3, 0, 5),
    ];

    let (candidates, _) = classify(TransferMode::B, &records);

    assert_eq!(candidates.len(), 1);
    // min(10-2, max(8.0, 2)) = 8，剩余 2 < 安全库存 8
    assert_eq!(candidates[0].available, 8);
    assert_eq!(candidates[0].transfer_type, TransferType::RfEnhanced);
}

#[test]
fn test_mode_b_surplus_when_safety_kept() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 20, 0, 3, 2, 1),
        rec("HA02", "OM1", SiteType::Rf, 0, 0, 3, 0, 5),
    ];

    let (candidates, _) = classify(TransferMode::B, &records);

    // min(18, 16.0) = 16，剩余 4 ≥ 3
    assert_eq!(candidates[0].available, 16);
    assert_eq!(candidates[0].transfer_type, TransferType::RfSurplus);
}

// ==========================================
// C 模式
// ==========================================

#[test]
fn test_mode_c_rf_complete_with_ties() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 6, 0, 2, 0, 0),
        rec("HA02", "OM1", SiteType::Rf, 4, 0, 2, 0, 3),
        rec("HA03", "OM1", SiteType::Rf, 2, 0, 2, 0, 0),
    ];

    let (candidates, _) = classify(TransferMode::C, &records);

    let sites: Vec<&str> = candidates.iter().map(|c| c.site.as_str()).collect();
    assert_eq!(sites, vec!["HA01", "HA03"]);
    assert!(candidates
        .iter()
        .all(|c| c.transfer_type == TransferType::CComplete && c.same_om_only));
    assert_eq!(candidates[0].available, 6);
}

#[test]
fn test_mode_c_rf_min_with_sales_is_not_a_candidate() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 6, 0, 2, 0, 1),
        rec("HA02", "OM1", SiteType::Rf, 4, 0, 2, 0, 3),
    ];
    let (candidates, _) = classify(TransferMode::C, &records);
    assert!(candidates.is_empty());
}

#[test]
fn test_mode_c_nd_min_per_om() {
    let records = vec![
        rec("HB01", "OM1", SiteType::Nd, 5, 0, 0, 0, 1),
        rec("HB02", "OM1", SiteType::Nd, 7, 0, 0, 0, 4),
        rec("HC01", "OM2", SiteType::Nd, 3, 0, 0, 0, 9),
    ];

    let (candidates, _) = classify(TransferMode::C, &records);

    let sites: Vec<&str> = candidates.iter().map(|c| c.site.as_str()).collect();
    assert_eq!(sites, vec!["HB01", "HC01"]);
    assert!(candidates.iter().all(|c| c.same_om_only));
}

// ==========================================
// ND 与边界
// ==========================================

#[test]
fn test_nd_full_stock_in_mode_a_and_b() {
    let records = vec![
        rec("HB01", "OM1", SiteType::Nd, 5, 3, 0, 0, 9),
        rec("HB02", "OM1", SiteType::Nd, 0, 0, 0, 0, 0),
    ];

    for mode in [TransferMode::A, TransferMode::B] {
        let (candidates, needs) = classify(mode, &records);
        // 零库存 ND 不产生候选
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].transfer_type, TransferType::NdTransfer);
        assert_eq!(candidates[0].available, 5);
        assert!(!candidates[0].same_om_only);
        // ND 店铺不产生需求
        assert!(needs.is_empty());
    }
}

#[test]
fn test_potential_shortage_for_top_seller() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 1, 0, 5, 0, 9),
        rec("HA02", "OM1", SiteType::Rf, 1, 0, 5, 0, 2),
    ];

    let (_, needs) = classify(TransferMode::A, &records);

    assert_eq!(needs.len(), 1);
    assert_eq!(needs[0].site, "HA01");
    assert_eq!(needs[0].need_type, NeedType::PotentialShortage);
    assert_eq!(needs[0].demand, 4);
}

#[test]
fn test_urgent_with_zero_safety_yields_no_need() {
    let records = vec![rec("HA01", "OM1", SiteType::Rf, 0, 0, 0, 0, 4)];
    let (_, needs) = classify(TransferMode::A, &records);
    assert!(needs.is_empty());
}

#[test]
fn test_urgent_takes_precedence_over_potential() {
    // 零库存且为最高销量：两条接收规则都满足，取紧急缺货
    let records = vec![rec("HA01", "OM1", SiteType::Rf, 0, 0, 6, 0, 4)];
    let (_, needs) = classify(TransferMode::B, &records);
    assert_eq!(needs.len(), 1);
    assert_eq!(needs[0].need_type, NeedType::UrgentShortage);
    assert_eq!(needs[0].demand, 6);
}

#[test]
fn test_article_context_groups() {
    let records = vec![
        rec("HA01", "OM1", SiteType::Rf, 0, 0, 0, 0, 4),
        rec("HA02", "OM2", SiteType::Rf, 0, 0, 0, 0, 7),
        rec("HB01", "OM1", SiteType::Nd, 0, 0, 0, 0, 2),
    ];
    let ctx = ArticleContext::build(records.iter());
    assert_eq!(ctx.max_rf_sold, Some(7));
    assert_eq!(ctx.min_rf_sold_by_om.get("OM1"), Some(&4));
    assert_eq!(ctx.min_nd_sold_by_om.get("OM1"), Some(&2));
    assert!(ctx.min_nd_sold_by_om.get("OM2").is_none());
}
