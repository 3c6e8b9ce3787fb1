//! Terminal tables

use comfy_table::{Attribute, Cell, Color, Table};
use resto_client::floor::status_color;
use resto_client::models::{DiningTable, Floor, Food, Order, OrderItem, OrderStatus, TableStatus};
use resto_client::{PageState, QuickStats};
use rust_decimal::Decimal;
use shared::util::format_rupiah;

/// `#rrggbb` to a terminal color.
pub fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

fn status_cell(status: &TableStatus) -> Cell {
    let cell = Cell::new(status.label());
    match hex_color(status_color(status)) {
        Some(color) => cell.bg(color).fg(Color::Black),
        None => cell,
    }
}

fn order_status_cell(status: OrderStatus) -> Cell {
    let cell = Cell::new(status.as_str());
    match status {
        OrderStatus::Progress => cell.fg(Color::Yellow),
        OrderStatus::Completed => cell.fg(Color::Green),
        OrderStatus::Canceled => cell.fg(Color::Red),
    }
}

pub fn floors(floors: &[Floor], selected: Option<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", ""]);
    for floor in floors {
        let marker = if selected == Some(floor.id.to_string().as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(floor.id),
            Cell::new(&floor.name),
            Cell::new(marker),
        ]);
    }
    table
}

pub fn dining_tables(tables: &[DiningTable]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Table", "Status"]);
    for t in tables {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.number),
            status_cell(&t.status),
        ]);
    }
    table
}

pub fn quick_stats(stats: &QuickStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Status", "Tables"]);
    for status in TableStatus::KNOWN {
        table.add_row(vec![status_cell(&status), Cell::new(stats.count(&status))]);
    }
    table
}

pub fn menu(foods: &[&Food]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Category", "Price"]);
    for food in foods {
        table.add_row(vec![
            Cell::new(food.id),
            Cell::new(&food.name),
            Cell::new(food.category.label()),
            Cell::new(format_rupiah(food.price)),
        ]);
    }
    table
}

pub fn order_items(items: &[OrderItem], total: Decimal) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Food", "Qty", "Price", "Subtotal"]);
    for (i, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&item.food.name),
            Cell::new(item.quantity),
            Cell::new(format_rupiah(item.food.price)),
            Cell::new(format_rupiah(item.line_total())),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format_rupiah(total)).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn orders(orders: &[Order]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Customer", "Table", "Cashier", "Status", "Total"]);
    for order in orders {
        let cashier = order.user.as_ref().map(|u| u.name.as_str()).unwrap_or("-");
        table.add_row(vec![
            Cell::new(order.id),
            Cell::new(&order.customer_name),
            Cell::new(order.table_label()),
            Cell::new(cashier),
            order_status_cell(order.status),
            Cell::new(format_rupiah(order.total_price)),
        ]);
    }
    table
}

/// `Page 2 of 5  [< prev] [next >]`
pub fn page_footer(page: PageState) -> String {
    let mut footer = format!("Page {} of {}", page.page, page.last_page);
    if page.has_previous() {
        footer.push_str("  [< --page ");
        footer.push_str(&(page.page - 1).to_string());
        footer.push(']');
    }
    if page.has_next() {
        footer.push_str("  [--page ");
        footer.push_str(&(page.page + 1).to_string());
        footer.push_str(" >]");
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(
            hex_color("#c8e6c9"),
            Some(Color::Rgb {
                r: 0xc8,
                g: 0xe6,
                b: 0xc9
            })
        );
        assert_eq!(hex_color("c8e6c9"), None);
        assert_eq!(hex_color("#fff"), None);
        assert_eq!(hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_page_footer() {
        assert_eq!(
            page_footer(PageState {
                page: 1,
                last_page: 1
            }),
            "Page 1 of 1"
        );
        assert_eq!(
            page_footer(PageState {
                page: 2,
                last_page: 3
            }),
            "Page 2 of 3  [< --page 1]  [--page 3 >]"
        );
    }
}
