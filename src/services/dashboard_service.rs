// src/services/dashboard_service.rs

use std::collections::HashSet;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;

use crate::{
    common::error::AppError,
    db::{InspectionRepository, ItemRepository},
    models::{
        dashboard::{Alert, AlertKind, DashboardOverview, DashboardStats},
        inspection::{InspectionWithItem, RepairNeed},
        item::Item,
    },
};

// Mês médio usado no cálculo de garantia (aproximação, não calendário)
const AVERAGE_MONTH_DAYS: f64 = 30.44;
const EXPIRING_SOON_DAYS: i64 = 30;
const RECENT_ACTIVITY_LEN: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    item_repo: ItemRepository,
    inspection_repo: InspectionRepository,
    pool: SqlitePool,
}

impl DashboardService {
    pub fn new(item_repo: ItemRepository, inspection_repo: InspectionRepository, pool: SqlitePool) -> Self {
        Self { item_repo, inspection_repo, pool }
    }

    /// Recalculado a cada chamada, sem cache.
    pub async fn get_overview(&self) -> Result<DashboardOverview, AppError> {
        // Snapshot consistente dos dois conjuntos
        let mut tx = self.pool.begin().await?;
        let items = self.item_repo.list_items(&mut *tx).await?;
        let inspections = self.inspection_repo.list_with_items(&mut *tx).await?;
        tx.commit().await?;

        Ok(build_overview(items, &inspections, Local::now().naive_local()))
    }
}

/// "<inteiro> <unidade>" -> meses. Qualquer outra forma vale 0.
pub fn warranty_months(warranty_period: &str) -> i64 {
    let lowered = warranty_period.to_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();
    let [amount, unit] = parts.as_slice() else {
        return 0;
    };
    let Ok(amount) = amount.parse::<i64>() else {
        return 0;
    };

    // Texto livre: um valor absurdo não pode estourar o i64
    if unit.contains("year") {
        amount.checked_mul(12).unwrap_or(0)
    } else if unit.contains("month") {
        amount
    } else {
        0
    }
}

/// Fim da garantia: data de fornecimento + meses * 30,44 dias.
/// `None` quando a data não é "%Y-%m-%d" ou o período não conta.
pub fn warranty_end(supply_date: &str, warranty_period: &str) -> Option<NaiveDateTime> {
    let supplied = NaiveDate::parse_from_str(supply_date, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)?;
    let months = warranty_months(warranty_period);
    if months <= 0 {
        return None;
    }
    let millis = (months as f64 * AVERAGE_MONTH_DAYS * 86_400_000.0).round() as i64;
    supplied.checked_add_signed(Duration::try_milliseconds(millis)?)
}

pub fn build_overview(
    items: Vec<Item>,
    inspections: &[InspectionWithItem],
    now: NaiveDateTime,
) -> DashboardOverview {
    let active_vendors = items.iter().map(|i| i.vendor_name.as_str()).collect::<HashSet<_>>().len();

    let failed: Vec<&InspectionWithItem> = inspections
        .iter()
        .filter(|i| i.inspection.need_replacement_repair == RepairNeed::Yes)
        .collect();

    let mut items_under_warranty = 0;
    let mut expiring_soon = 0;
    for item in &items {
        let Some(end) = warranty_end(&item.supply_date, &item.warranty_period) else {
            continue;
        };
        if end > now {
            items_under_warranty += 1;
            if (end - now).num_days() <= EXPIRING_SOON_DAYS {
                expiring_soon += 1;
            }
        }
    }

    let mut alerts = Vec::with_capacity(failed.len() + 1);
    if expiring_soon > 0 {
        alerts.push(Alert {
            kind: AlertKind::Warning,
            message: format!("{} items have warranty expiring within 30 days", expiring_soon),
            category: "Warranty Management".to_string(),
        });
    }
    for insp in &failed {
        alerts.push(Alert {
            kind: AlertKind::Danger,
            message: format!("Item '{}' (Lot: {}) requires attention.", insp.item_type, insp.lot_number),
            category: "Inspection Alert".to_string(),
        });
    }

    let stats = DashboardStats {
        total_items: items.len(),
        active_vendors,
        items_under_warranty,
        failed_inspections: failed.len(),
    };

    // `items` já vem do mais novo para o mais antigo
    let recent_activity = items.into_iter().take(RECENT_ACTIVITY_LEN).collect();

    DashboardOverview { stats, recent_activity, alerts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inspection::Inspection;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn item(timestamp: i64, vendor: &str, supply_date: &str, warranty: &str) -> Item {
        Item {
            timestamp,
            vendor_name: vendor.into(),
            lot_number: format!("L-{}", timestamp),
            item_type: "Pump".into(),
            manufacture_date: "2023-01-01".into(),
            supply_date: supply_date.into(),
            warranty_period: warranty.into(),
            status: "active".into(),
            created_at: at("2024-01-01"),
            qr_file_path: None,
        }
    }

    fn inspection(id: i64, need: RepairNeed, item_type: &str, lot: &str) -> InspectionWithItem {
        InspectionWithItem {
            inspection: Inspection {
                id,
                qr_timestamp: 1,
                inspection_time: "2024-02-01T00:00:00".into(),
                inspection_report: None,
                need_replacement_repair: need,
                created_at: at("2024-02-01"),
                request_id: Some(id),
            },
            item_type: item_type.into(),
            lot_number: lot.into(),
        }
    }

    #[test]
    fn parses_years_and_months() {
        assert_eq!(warranty_months("1 year"), 12);
        assert_eq!(warranty_months("2 Years"), 24);
        assert_eq!(warranty_months("2 months"), 2);
        assert_eq!(warranty_months("18 month"), 18);
    }

    #[test]
    fn unparseable_periods_are_zero() {
        assert_eq!(warranty_months("lifetime"), 0);
        assert_eq!(warranty_months(""), 0);
        assert_eq!(warranty_months("two years"), 0);
        assert_eq!(warranty_months("3 weeks"), 0);
        assert_eq!(warranty_months("1 year 6 months"), 0);
    }

    #[test]
    fn huge_periods_do_not_overflow() {
        assert_eq!(warranty_months("999999999999999999 years"), 0);
        assert_eq!(warranty_months("9223372036854775807 months"), i64::MAX);
        assert!(warranty_end("2024-01-01", "999999999999999999 years").is_none());
        assert!(warranty_end("2024-01-01", "9223372036854775807 months").is_none());

        let items = vec![
            item(2, "Acme", "2024-01-01", "999999999999999999 years"),
            item(1, "Acme", "2024-01-01", "9223372036854775807 months"),
        ];
        let overview = build_overview(items, &[], at("2024-06-01"));
        assert_eq!(overview.stats.total_items, 2);
        assert_eq!(overview.stats.items_under_warranty, 0);
    }

    #[test]
    fn one_year_from_new_year_ends_around_new_year() {
        let end = warranty_end("2024-01-01", "1 year").unwrap();
        // 12 * 30.44 = 365.28 dias
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert!(warranty_end("01/01/2024", "1 year").is_none());
        assert!(warranty_end("2024-01-01", "lifetime").is_none());
    }

    #[test]
    fn item_under_warranty_but_not_expiring() {
        let items = vec![item(1, "Acme", "2024-01-01", "1 year")];
        let overview = build_overview(items, &[], at("2024-06-01"));

        assert_eq!(overview.stats.items_under_warranty, 1);
        assert!(overview.alerts.is_empty());
    }

    #[test]
    fn expiring_items_raise_one_aggregate_warning() {
        let items = vec![
            // ~2024-03-01: faltam ~20 dias
            item(3, "Acme", "2024-01-01", "2 months"),
            item(2, "Acme", "2024-01-05", "2 months"),
            // Já venceu
            item(1, "Beta", "2022-01-01", "1 year"),
        ];
        let overview = build_overview(items, &[], at("2024-02-10"));

        assert_eq!(overview.stats.items_under_warranty, 2);
        assert_eq!(overview.alerts.len(), 1);
        assert_eq!(overview.alerts[0].kind, AlertKind::Warning);
        assert_eq!(overview.alerts[0].category, "Warranty Management");
        assert_eq!(overview.alerts[0].message, "2 items have warranty expiring within 30 days");
    }

    #[test]
    fn bad_supply_dates_and_periods_are_skipped() {
        let items = vec![
            item(2, "Acme", "not a date", "1 year"),
            item(1, "Acme", "2024-01-01", "lifetime"),
        ];
        let overview = build_overview(items, &[], at("2024-06-01"));

        assert_eq!(overview.stats.total_items, 2);
        assert_eq!(overview.stats.items_under_warranty, 0);
        assert!(overview.alerts.is_empty());
    }

    #[test]
    fn danger_alerts_match_failed_inspections() {
        let inspections = vec![
            inspection(1, RepairNeed::Yes, "Pump", "L-1"),
            inspection(2, RepairNeed::No, "Pump", "L-1"),
            inspection(3, RepairNeed::Yes, "Valve", "L-2"),
        ];
        let overview = build_overview(vec![], &inspections, at("2024-06-01"));

        let danger: Vec<&Alert> = overview.alerts.iter().filter(|a| a.kind == AlertKind::Danger).collect();
        assert_eq!(danger.len(), 2);
        assert_eq!(overview.stats.failed_inspections, 2);
        assert_eq!(danger[0].message, "Item 'Pump' (Lot: L-1) requires attention.");
        assert_eq!(danger[1].category, "Inspection Alert");
    }

    #[test]
    fn stats_count_vendors_and_keep_five_newest() {
        let items: Vec<Item> = (0..7)
            .rev()
            .map(|ts| item(ts, if ts % 2 == 0 { "Acme" } else { "Beta" }, "2024-01-01", "1 year"))
            .collect();
        let overview = build_overview(items, &[], at("2024-06-01"));

        assert_eq!(overview.stats.total_items, 7);
        assert_eq!(overview.stats.active_vendors, 2);
        let recent: Vec<i64> = overview.recent_activity.iter().map(|i| i.timestamp).collect();
        assert_eq!(recent, vec![6, 5, 4, 3, 2]);
    }

    #[test]
    fn overview_serializes_with_camel_case_keys() {
        let overview = build_overview(vec![item(1, "Acme", "2024-01-01", "1 year")], &[], at("2024-06-01"));
        let json = serde_json::to_value(&overview).unwrap();

        assert_eq!(json["stats"]["totalItems"], 1);
        assert_eq!(json["stats"]["itemsUnderWarranty"], 1);
        assert!(json["recentActivity"].is_array());
        assert!(json["alerts"].is_array());
    }
}
