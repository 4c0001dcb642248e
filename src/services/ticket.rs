// src/services/ticket.rs

use rust_decimal::Decimal;

use crate::{models::order::OrderDetail, services::report::money};

const RULE: &str = "------------------------";

// Comanda de cozinha em texto puro, pronta para impressora térmica.
// O carimbo de data é o created_at armazenado do pedido, então a saída
// é estável para um mesmo pedido.
pub fn render_ticket(order: &OrderDetail) -> String {
    let header = &order.header;
    let mut out = String::new();

    out.push_str(&format!("PEDIDO #{}\n", short_id(order)));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Mesa: {}\n", header.table_number));
    out.push_str(&format!("Garçom: {}\n", order.waiter_name));
    out.push_str(&format!("Data: {}\n", header.created_at.format("%d/%m/%Y %H:%M")));
    out.push_str(RULE);
    out.push('\n');

    for line in &order.items {
        let line_total = line.item.unit_price * Decimal::from(line.item.quantity);
        out.push_str(&format!(
            "{} x {} - {}\n",
            line.menu_item_name,
            line.item.quantity,
            money(line_total)
        ));
    }

    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("TOTAL: {}\n", money(header.total_amount)));
    out.push_str(RULE);
    out.push('\n');

    out
}

// Os oito primeiros dígitos do UUID bastam para a cozinha
fn short_id(order: &OrderDetail) -> String {
    order.header.id.simple().to_string()[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{Order, OrderItem, OrderItemDetail, OrderStatus};
    use chrono::TimeZone;
    use chrono::Utc;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample_order() -> OrderDetail {
        let order_id = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap();
        let created = Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0).unwrap();
        OrderDetail {
            header: Order {
                id: order_id,
                table_number: 4,
                waiter_id: Uuid::new_v4(),
                status: OrderStatus::Pending,
                total_amount: dec("15.00"),
                created_at: created,
                updated_at: created,
            },
            waiter_name: "Ali".to_string(),
            items: vec![
                OrderItemDetail {
                    item: OrderItem {
                        id: Uuid::new_v4(),
                        order_id,
                        menu_item_id: Uuid::new_v4(),
                        quantity: 2,
                        unit_price: dec("5.00"),
                        total_price: dec("10.00"),
                        notes: None,
                        created_at: created,
                    },
                    menu_item_name: "Chá".to_string(),
                },
                OrderItemDetail {
                    item: OrderItem {
                        id: Uuid::new_v4(),
                        order_id,
                        menu_item_id: Uuid::new_v4(),
                        quantity: 1,
                        unit_price: dec("5.00"),
                        total_price: dec("5.00"),
                        notes: Some("sem açúcar".to_string()),
                        created_at: created,
                    },
                    menu_item_name: "Chá".to_string(),
                },
            ],
        }
    }

    #[test]
    fn ticket_matches_expected_layout() {
        let expected = "PEDIDO #A1B2C3D4\n\
                        ------------------------\n\
                        Mesa: 4\n\
                        Garçom: Ali\n\
                        Data: 14/03/2025 18:30\n\
                        ------------------------\n\
                        Chá x 2 - 10.00\n\
                        Chá x 1 - 5.00\n\
                        ------------------------\n\
                        TOTAL: 15.00\n\
                        ------------------------\n";

        assert_eq!(render_ticket(&sample_order()), expected);
    }

    #[test]
    fn ticket_is_stable_for_the_same_order() {
        let order = sample_order();
        assert_eq!(render_ticket(&order), render_ticket(&order));
    }
}
