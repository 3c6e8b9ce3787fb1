use anyhow::{Result, anyhow, bail};
use inquire::{Select, Text};
use resto_client::models::Food;
use resto_client::{ClientError, HttpClient, OrderWorkflow, RestoApi, Route};
use shared::util::format_rupiah;

use super::Context;
use super::floor::load_browser;
use crate::cli::{MenuArgs, OrderCommand};
use crate::render;

const DONE: &str = "Done";

pub async fn run<C: HttpClient>(ctx: &mut Context<C>, command: OrderCommand) -> Result<()> {
    ctx.require_login()?;
    match command {
        OrderCommand::Create {
            table,
            customer,
            pick,
        } => {
            let mut workflow = create(ctx, table, customer).await?;
            if pick {
                pick_items(ctx, &mut workflow).await?;
            }
            Ok(())
        }
        OrderCommand::Add { order, foods } => {
            let mut workflow = open(ctx, &order).await?;
            add(ctx, &mut workflow, &foods).await?;
            show_items(&workflow);
            Ok(())
        }
        OrderCommand::Pick { order } => {
            let mut workflow = open(ctx, &order).await?;
            pick_items(ctx, &mut workflow).await
        }
        OrderCommand::Show { order } => {
            let workflow = open(ctx, &order).await?;
            show_items(&workflow);
            Ok(())
        }
        OrderCommand::Menu(args) => menu(ctx, args).await,
    }
}

/// `12` or `/order/12?table=7`
pub(crate) fn parse_order_ref(input: &str) -> Result<OrderRef> {
    if let Some(Route::Order { order_id, table_id }) = Route::parse(input) {
        return Ok(OrderRef::Route { order_id, table_id });
    }
    input
        .trim()
        .parse()
        .map(OrderRef::Id)
        .map_err(|_| anyhow!("not an order id or order path: {input}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OrderRef {
    Id(i64),
    Route { order_id: i64, table_id: i64 },
}

/// Open the item-entry screen of an existing order.
async fn open<C: HttpClient>(ctx: &Context<C>, input: &str) -> Result<OrderWorkflow> {
    let mut workflow = OrderWorkflow::new();
    match parse_order_ref(input)? {
        OrderRef::Route { order_id, table_id } => {
            workflow.enter(&ctx.api, Route::Order { order_id, table_id }).await?;
        }
        OrderRef::Id(order_id) => {
            let order = ctx.api.order(order_id).await?;
            workflow.resume(&ctx.api, order_id, order.table_id).await?;
        }
    }
    Ok(workflow)
}

async fn create<C: HttpClient>(
    ctx: &Context<C>,
    table_id: i64,
    customer: Option<String>,
) -> Result<OrderWorkflow> {
    let table = ctx
        .api
        .tables()
        .await?
        .into_iter()
        .find(|t| t.id == table_id)
        .ok_or_else(|| anyhow!("Table {table_id} not found"))?;

    let mut browser = load_browser(ctx, Some(table.floor_id.to_string())).await?;
    if !browser.click_table(table_id) {
        bail!(ClientError::TableInactive(table_id));
    }

    let customer = match customer {
        Some(name) => name,
        None => Text::new("Customer name:").prompt()?,
    };
    browser.set_customer_name(customer);

    let mut workflow = OrderWorkflow::new();
    let route = browser.submit_order(&ctx.api, &mut workflow).await?;
    println!("Order opened on table {}", table.number);
    println!("-> {route}");
    Ok(workflow)
}

/// Food by id, looking past the first page when needed.
async fn find_food<C: HttpClient>(api: &RestoApi<C>, food_id: i64) -> Result<Food> {
    let mut page = 1;
    loop {
        let foods = api.foods(page).await?;
        if let Some(food) = foods.data.into_iter().find(|f| f.id == food_id) {
            return Ok(food);
        }
        if page >= foods.last_page {
            bail!(ClientError::NotFound(format!("food {food_id}")));
        }
        page += 1;
    }
}

async fn add<C: HttpClient>(
    ctx: &Context<C>,
    workflow: &mut OrderWorkflow,
    food_ids: &[i64],
) -> Result<()> {
    workflow.load_menu(&ctx.api).await?;
    for &food_id in food_ids {
        let food = match workflow.menu_item(food_id) {
            Some(food) => food.clone(),
            None => find_food(&ctx.api, food_id).await?,
        };
        let item = workflow.add_item(&ctx.api, &food).await?;
        println!("+ {} x{}", item.food.name, item.quantity);
    }
    Ok(())
}

async fn pick_items<C: HttpClient>(ctx: &Context<C>, workflow: &mut OrderWorkflow) -> Result<()> {
    workflow.load_menu(&ctx.api).await?;
    loop {
        let foods: Vec<Food> = workflow.visible_menu().into_iter().cloned().collect();
        let mut options: Vec<String> = foods
            .iter()
            .map(|f| format!("{} ({})", f.name, format_rupiah(f.price)))
            .collect();
        options.push(DONE.to_string());

        let Some(choice) = Select::new("Add item:", options.clone()).prompt_skippable()? else {
            break;
        };
        let Some(food) = options
            .iter()
            .position(|o| *o == choice)
            .and_then(|i| foods.get(i))
        else {
            break;
        };
        let item = workflow.add_item(&ctx.api, food).await?;
        println!("+ {} x{}", item.food.name, item.quantity);
    }
    show_items(workflow);
    Ok(())
}

fn show_items(workflow: &OrderWorkflow) {
    if let Some(route) = workflow.phase().route() {
        println!("{route}");
    }
    if workflow.items().is_empty() {
        println!("No items yet");
        return;
    }
    println!(
        "{}",
        render::order_items(workflow.items(), workflow.running_total())
    );
}

async fn menu<C: HttpClient>(ctx: &Context<C>, args: MenuArgs) -> Result<()> {
    let mut workflow = OrderWorkflow::new();
    workflow.load_menu(&ctx.api).await?;
    if let Some(category) = args.category {
        workflow.filter.toggle_category(category);
    }
    if let Some(search) = args.search {
        workflow.filter.set_search(search);
    }

    let visible = workflow.visible_menu();
    if visible.is_empty() {
        println!("No food matches");
    } else {
        println!("{}", render::menu(&visible));
    }
    Ok(())
}
