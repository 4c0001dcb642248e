// src/services/report.rs
//
// O motor de agregação da contabilidade: recebe a lista de pedidos e
// deriva receita/contagens por garçom e por produto. Tudo puro e em
// memória — o resultado é efêmero e recalculado a cada snapshot.

use rust_decimal::Decimal;

use crate::models::{
    order::{OrderDetail, OrderStatus},
    report::{AggregateStats, StatusPolicy},
};

// Soma em precisão total; arredondamento para 2 casas só acontece na
// formatação (CSV), nunca durante a acumulação.
pub fn compute_stats(orders: &[OrderDetail], policy: StatusPolicy) -> AggregateStats {
    let mut stats = AggregateStats::default();

    for order in orders {
        if policy == StatusPolicy::Completed && order.header.status != OrderStatus::Completed {
            continue;
        }

        stats.total_order_count += 1;

        let mut order_revenue = Decimal::ZERO;
        for line in &order.items {
            let line_total = line.item.unit_price * Decimal::from(line.item.quantity);

            let item = stats.per_item.entry(line.menu_item_name.clone()).or_default();
            item.quantity_sold += line.item.quantity as u64;
            item.revenue_total += line_total;

            order_revenue += line_total;
        }

        // O garçom conta o pedido mesmo quando ele não tem itens
        let waiter = stats.per_waiter.entry(order.waiter_name.clone()).or_default();
        waiter.order_count += 1;
        waiter.revenue_total += order_revenue;

        stats.total_revenue += order_revenue;
    }

    stats
}

// Três seções em ordem fixa, cada uma com linha de título e cabeçalho.
// Vírgulas dentro de nomes NÃO são escapadas — limitação conhecida do
// formato, não um risco de pânico.
pub fn format_csv(stats: &AggregateStats) -> String {
    let mut out = String::new();

    out.push_str("Estatísticas Gerais\n");
    out.push_str("Indicador,Valor\n");
    out.push_str(&format!("Total de Pedidos,{}\n", stats.total_order_count));
    out.push_str(&format!("Receita Total,{}\n", money(stats.total_revenue)));
    out.push('\n');

    out.push_str("Desempenho dos Garçons\n");
    out.push_str("Garçom,Pedidos,Receita Total\n");
    for (name, w) in &stats.per_waiter {
        out.push_str(&format!("{},{},{}\n", name, w.order_count, money(w.revenue_total)));
    }
    out.push('\n');

    out.push_str("Produtos Vendidos\n");
    out.push_str("Produto,Quantidade,Receita Total\n");
    for (name, i) in &stats.per_item {
        out.push_str(&format!("{},{},{}\n", name, i.quantity_sold, money(i.revenue_total)));
    }

    out
}

// Sempre exatamente 2 casas decimais na apresentação; arredondamento
// comercial (meio para longe do zero), só aqui na borda
pub(crate) fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{Order, OrderItem, OrderItemDetail};
    use chrono::Utc;
    use uuid::Uuid;

    fn line(name: &str, quantity: i32, unit_price: Decimal) -> OrderItemDetail {
        OrderItemDetail {
            item: OrderItem {
                id: Uuid::new_v4(),
                order_id: Uuid::new_v4(),
                menu_item_id: Uuid::new_v4(),
                quantity,
                unit_price,
                total_price: unit_price * Decimal::from(quantity),
                notes: None,
                created_at: Utc::now(),
            },
            menu_item_name: name.to_string(),
        }
    }

    fn order(waiter: &str, status: OrderStatus, items: Vec<OrderItemDetail>) -> OrderDetail {
        let total: Decimal = items
            .iter()
            .map(|l| l.item.unit_price * Decimal::from(l.item.quantity))
            .sum();
        OrderDetail {
            header: Order {
                id: Uuid::new_v4(),
                table_number: 1,
                waiter_id: Uuid::new_v4(),
                status,
                total_amount: total,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            waiter_name: waiter.to_string(),
            items,
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn ali_sells_tea_scenario() {
        let orders = vec![
            order("Ali", OrderStatus::Pending, vec![line("Chá", 2, dec("5.00"))]),
            order("Ali", OrderStatus::Pending, vec![line("Chá", 1, dec("5.00"))]),
        ];

        let stats = compute_stats(&orders, StatusPolicy::All);

        let ali = &stats.per_waiter["Ali"];
        assert_eq!(ali.order_count, 2);
        assert_eq!(ali.revenue_total, dec("15.00"));

        let tea = &stats.per_item["Chá"];
        assert_eq!(tea.quantity_sold, 3);
        assert_eq!(tea.revenue_total, dec("15.00"));

        assert_eq!(stats.total_revenue, dec("15.00"));
        assert_eq!(stats.total_order_count, 2);
    }

    #[test]
    fn empty_order_list_yields_zeroes() {
        let stats = compute_stats(&[], StatusPolicy::All);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
        assert_eq!(stats.total_order_count, 0);
        assert!(stats.per_waiter.is_empty());
        assert!(stats.per_item.is_empty());
    }

    #[test]
    fn order_without_items_counts_but_adds_no_revenue() {
        let orders = vec![order("Bia", OrderStatus::Pending, vec![])];
        let stats = compute_stats(&orders, StatusPolicy::All);

        assert_eq!(stats.total_order_count, 1);
        assert_eq!(stats.per_waiter["Bia"].order_count, 1);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
    }

    #[test]
    fn total_revenue_is_permutation_invariant() {
        let a = order("Ali", OrderStatus::Pending, vec![
            line("Chá", 2, dec("5.00")),
            line("Café", 1, dec("3.50")),
        ]);
        let b = order("Bia", OrderStatus::Pending, vec![line("Bolo", 3, dec("7.25"))]);
        let c = order("Ali", OrderStatus::Pending, vec![line("Café", 2, dec("3.50"))]);

        let forward = compute_stats(&[a.clone(), b.clone(), c.clone()], StatusPolicy::All);
        let backward = compute_stats(&[c, b, a], StatusPolicy::All);

        assert_eq!(forward.total_revenue, backward.total_revenue);
        assert_eq!(forward.per_waiter["Ali"], backward.per_waiter["Ali"]);
        assert_eq!(forward.per_item["Café"], backward.per_item["Café"]);
    }

    #[test]
    fn waiter_order_counts_sum_to_total() {
        let orders = vec![
            order("Ali", OrderStatus::Pending, vec![line("Chá", 1, dec("5.00"))]),
            order("Bia", OrderStatus::Completed, vec![line("Café", 2, dec("3.50"))]),
            order("Ali", OrderStatus::Ready, vec![]),
        ];
        let stats = compute_stats(&orders, StatusPolicy::All);

        let sum: u64 = stats.per_waiter.values().map(|w| w.order_count).sum();
        assert_eq!(sum, stats.total_order_count);
    }

    #[test]
    fn item_revenue_sums_to_total_revenue() {
        let orders = vec![
            order("Ali", OrderStatus::Pending, vec![
                line("Chá", 2, dec("5.00")),
                line("Bolo", 1, dec("7.25")),
            ]),
            order("Bia", OrderStatus::Pending, vec![line("Chá", 4, dec("5.00"))]),
        ];
        let stats = compute_stats(&orders, StatusPolicy::All);

        let sum: Decimal = stats.per_item.values().map(|i| i.revenue_total).sum();
        assert_eq!(sum, stats.total_revenue);
    }

    #[test]
    fn completed_policy_filters_open_and_cancelled_orders() {
        let orders = vec![
            order("Ali", OrderStatus::Completed, vec![line("Chá", 1, dec("5.00"))]),
            order("Ali", OrderStatus::Pending, vec![line("Chá", 1, dec("5.00"))]),
            order("Bia", OrderStatus::Cancelled, vec![line("Café", 1, dec("3.50"))]),
        ];
        let stats = compute_stats(&orders, StatusPolicy::Completed);

        assert_eq!(stats.total_order_count, 1);
        assert_eq!(stats.total_revenue, dec("5.00"));
        assert!(!stats.per_waiter.contains_key("Bia"));
    }

    #[test]
    fn display_order_follows_first_appearance() {
        let orders = vec![
            order("Carla", OrderStatus::Pending, vec![line("Suco", 1, dec("4.00"))]),
            order("Ali", OrderStatus::Pending, vec![line("Chá", 1, dec("5.00"))]),
            order("Carla", OrderStatus::Pending, vec![line("Chá", 1, dec("5.00"))]),
        ];
        let stats = compute_stats(&orders, StatusPolicy::All);

        let waiters: Vec<&String> = stats.per_waiter.keys().collect();
        assert_eq!(waiters, ["Carla", "Ali"]);
        let items: Vec<&String> = stats.per_item.keys().collect();
        assert_eq!(items, ["Suco", "Chá"]);
    }

    #[test]
    fn csv_output_is_deterministic_and_two_decimal() {
        let orders = vec![
            order("Ali", OrderStatus::Pending, vec![line("Chá", 2, dec("5.00"))]),
            order("Ali", OrderStatus::Pending, vec![line("Chá", 1, dec("5.00"))]),
        ];

        let first = format_csv(&compute_stats(&orders, StatusPolicy::All));
        let second = format_csv(&compute_stats(&orders, StatusPolicy::All));
        assert_eq!(first, second);

        let expected = "Estatísticas Gerais\n\
                        Indicador,Valor\n\
                        Total de Pedidos,2\n\
                        Receita Total,15.00\n\
                        \n\
                        Desempenho dos Garçons\n\
                        Garçom,Pedidos,Receita Total\n\
                        Ali,2,15.00\n\
                        \n\
                        Produtos Vendidos\n\
                        Produto,Quantidade,Receita Total\n\
                        Chá,3,15.00\n";
        assert_eq!(first, expected);
    }

    #[test]
    fn accumulation_keeps_full_precision_until_formatting() {
        // 3 x 0.333 = 0.999 -> exibido como "1.00" só na formatação
        let orders = vec![order("Ali", OrderStatus::Pending, vec![line("Bala", 3, dec("0.333"))])];
        let stats = compute_stats(&orders, StatusPolicy::All);

        assert_eq!(stats.total_revenue, dec("0.999"));
        assert_eq!(money(stats.total_revenue), "1.00");
    }
}
