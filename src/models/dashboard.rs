// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::item::Item;

// 1. Os cards do topo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_items: usize,
    pub active_vendors: usize,
    pub items_under_warranty: usize,
    pub failed_inspections: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Warning,
    Danger,
}

// 2. Alertas, na ordem em que são gerados
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    #[schema(example = "Warranty Management")]
    pub category: String,
}

// 3. O snapshot completo, recalculado a cada chamada
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub recent_activity: Vec<Item>,
    pub alerts: Vec<Alert>,
}
