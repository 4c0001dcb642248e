// src/models/report.rs

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Estatísticas derivadas — nunca persistidas, recalculadas sob demanda
// a partir do conjunto de pedidos atual.

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WaiterStats {
    #[schema(example = 2)]
    pub order_count: u64,
    #[schema(example = "15.00")]
    pub revenue_total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemStats {
    #[schema(example = 3)]
    pub quantity_sold: u64,
    #[schema(example = "15.00")]
    pub revenue_total: Decimal,
}

// Os mapas preservam a ordem de primeira aparição (garçom/item), para que
// a saída formatada seja reprodutível.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    #[schema(value_type = Object)]
    pub per_waiter: IndexMap<String, WaiterStats>,
    #[schema(value_type = Object)]
    pub per_item: IndexMap<String, ItemStats>,
    #[schema(example = "15.00")]
    pub total_revenue: Decimal,
    #[schema(example = 2)]
    pub total_order_count: u64,
}

// Quais pedidos entram na conta. O código original agregava o que viesse
// na lista; o filtro por status vira um parâmetro explícito do chamador.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    #[default]
    All,
    Completed,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ReportQuery {
    #[serde(default)]
    pub scope: StatusPolicy,
}
