// ==========================================
// 调货建议不变量属性测试
// ==========================================
// 正数量 / 店铺不同 / 累计不超过原始库存 / 幂等
// C 模式仅同 OM / HD 不向出货组转出
// ==========================================

use proptest::prelude::*;
use std::collections::HashMap;
use stock_transfer::config::AllocationConfig;
use stock_transfer::domain::inventory::InventoryRecord;
use stock_transfer::domain::types::{SiteType, TransferMode};
use stock_transfer::engine::TransferPlanner;

const SITES: [&str; 8] = ["HA01", "HA02", "HB01", "HC01", "HD01", "HD02", "KL01", "TW01"];
const OMS: [&str; 2] = ["OM1", "OM2"];
const ARTICLES: [&str; 2] = ["000000000001", "000000000002"];

/// (是否包含, OM, 是否 ND, 净库存, 在途, 安全库存, MOQ, 上月销量, 本月销量)
type SlotSpec = (bool, usize, bool, i64, i64, i64, i64, i64, i64);

fn slot_strategy() -> impl Strategy<Value = SlotSpec> {
    (
        any::<bool>(),
        0..OMS.len(),
        prop::bool::weighted(0.25),
        0i64..40,
        0i64..6,
        0i64..25,
        0i64..8,
        -2i64..20,
        0i64..6,
    )
}

fn build_records(slots: &[SlotSpec]) -> Vec<InventoryRecord> {
    let mut records = Vec::new();
    for (i, slot) in slots.iter().enumerate() {
        let (include, om, nd, net, pending, safety, moq, sold, mtd) = *slot;
        if !include {
            continue;
        }
        records.push(InventoryRecord {
            article: ARTICLES[i / SITES.len()].to_string(),
            description: String::new(),
            om: OMS[om].to_string(),
            site: SITES[i % SITES.len()].to_string(),
            site_type: if nd { SiteType::Nd } else { SiteType::Rf },
            moq,
            net_stock: net,
            pending_received: pending,
            safety_stock: safety,
            last_month_sold: sold,
            mtd_sold: mtd,
        });
    }
    records
}

fn mode_strategy() -> impl Strategy<Value = TransferMode> {
    prop_oneof![
        Just(TransferMode::A),
        Just(TransferMode::B),
        Just(TransferMode::C),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn recommendations_respect_invariants(
        slots in prop::collection::vec(slot_strategy(), SITES.len() * ARTICLES.len()),
        mode in mode_strategy(),
    ) {
        let records = build_records(&slots);
        let config = AllocationConfig::default();
        let planner = TransferPlanner::new(config.clone()).unwrap();
        let plan = planner.plan(&records, mode).unwrap();

        let original: HashMap<(&str, &str), i64> = records
            .iter()
            .map(|r| ((r.article.as_str(), r.site.as_str()), r.net_stock))
            .collect();
        let mut sent: HashMap<(&str, &str), i64> = HashMap::new();

        for rec in &plan.recommendations {
            prop_assert!(rec.transfer_qty > 0);
            prop_assert_ne!(&rec.transfer_site, &rec.receive_site);
            prop_assert_eq!(&rec.article, &rec.receive_article);

            let key = (rec.article.as_str(), rec.transfer_site.as_str());
            let total = sent.entry(key).or_insert(0);
            *total += rec.transfer_qty;
            prop_assert!(*total <= original[&key]);
            prop_assert_eq!(rec.transfer_site_after_stock, original[&key] - *total);

            if mode == TransferMode::C {
                prop_assert_eq!(&rec.transfer_om, &rec.receive_om);
            }

            let from_hd = rec.transfer_site.starts_with(config.hd_site_prefix.as_str());
            let to_feeder = config
                .feeder_site_prefixes
                .iter()
                .any(|p| rec.receive_site.starts_with(p.as_str()));
            prop_assert!(!(from_hd && to_feeder));
        }

        prop_assert!(plan.quality.passed);
    }

    #[test]
    fn plan_is_deterministic(
        slots in prop::collection::vec(slot_strategy(), SITES.len() * ARTICLES.len()),
        mode in mode_strategy(),
    ) {
        let records = build_records(&slots);
        let planner = TransferPlanner::new(AllocationConfig::default()).unwrap();

        let first = planner.plan(&records, mode).unwrap();
        let second = planner.plan(&records, mode).unwrap();

        prop_assert_eq!(first.recommendations, second.recommendations);
    }
}
