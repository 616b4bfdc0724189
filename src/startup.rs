use crate::auth_jwt::auth::TokenService;
use crate::config::configuration::JwtSettings;
use crate::middleware::jwt_auth_middleware;
use crate::routes::{
    food::food::{create_food, get_food, list_foods, update_food},
    health_check::health_check,
    invoice::invoice::{create_invoice, get_invoice, list_invoices, update_invoice},
    menu::menu::{create_menu, get_menu, list_menus, update_menu},
    order::order::{create_order, get_order, list_orders, update_order},
    order_item::order_item::{
        create_order_items, get_order_item, get_order_items_by_order, list_order_items,
        update_order_item,
    },
    table::table::{create_table, get_table, list_tables, update_table},
    user::user::{get_user, list_users, login_user, signup_user},
};
use crate::services::{InvoiceComposer, OrderComposer, OrderLifecycle};
use crate::store::Stores;
use actix_web::{dev::Server, web, App, HttpServer};
use actix_web_lab::middleware::from_fn;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/**************************************************************/
// Shared state handed to every handler, built once at startup
/***************************************************************/
pub struct AppState {
    pub stores: Stores,
    pub tokens: TokenService,
    pub composer: OrderComposer,
    pub invoices: InvoiceComposer,
    pub lifecycle: OrderLifecycle,
}

impl AppState {
    pub fn new(stores: Stores, jwt: &JwtSettings) -> Self {
        let composer = OrderComposer::new(
            stores.order_items.clone(),
            stores.orders.clone(),
            stores.tables.clone(),
            stores.foods.clone(),
        );
        let invoices = InvoiceComposer::new(stores.invoices.clone(), composer.clone());
        let lifecycle = OrderLifecycle::new(
            stores.tables.clone(),
            stores.foods.clone(),
            stores.orders.clone(),
            stores.order_items.clone(),
        );
        Self {
            stores,
            tokens: TokenService::new(jwt),
            composer,
            invoices,
            lifecycle,
        }
    }
}

/**************************************************************/
// Application State re reuse the same code in main and tests
/***************************************************************/
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(host: &str, port: u16, state: AppState) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(format!("{}:{}", host, port))?;
        let actual_port = listener.local_addr()?.port();

        let server = run_server(listener, state).await?;
        Ok(Self {
            port: actual_port,
            server,
        })
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/******************************************/
// Running Server
/******************************************/
pub async fn run_server(listener: TcpListener, state: AppState) -> Result<Server, std::io::Error> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .route("/health_check", web::get().to(health_check))
            .route("/users/signup", web::post().to(signup_user))
            .route("/users/login", web::post().to(login_user))
            .service(
                web::scope("")
                    .wrap(from_fn(jwt_auth_middleware))
                    .route("/users", web::get().to(list_users))
                    .route("/users/{user_id}", web::get().to(get_user))
                    .route("/tables", web::get().to(list_tables))
                    .route("/tables", web::post().to(create_table))
                    .route("/tables/{table_id}", web::get().to(get_table))
                    .route("/tables/{table_id}", web::patch().to(update_table))
                    .route("/menus", web::get().to(list_menus))
                    .route("/menus", web::post().to(create_menu))
                    .route("/menus/{menu_id}", web::get().to(get_menu))
                    .route("/menus/{menu_id}", web::patch().to(update_menu))
                    .route("/foods", web::get().to(list_foods))
                    .route("/foods", web::post().to(create_food))
                    .route("/foods/{food_id}", web::get().to(get_food))
                    .route("/foods/{food_id}", web::patch().to(update_food))
                    .route("/orders", web::get().to(list_orders))
                    .route("/orders", web::post().to(create_order))
                    .route("/orders/{order_id}", web::get().to(get_order))
                    .route("/orders/{order_id}", web::patch().to(update_order))
                    .route("/orderItems", web::get().to(list_order_items))
                    .route("/orderItems", web::post().to(create_order_items))
                    .route(
                        "/orderItems/order/{order_id}",
                        web::get().to(get_order_items_by_order),
                    )
                    .route("/orderItems/{order_item_id}", web::get().to(get_order_item))
                    .route(
                        "/orderItems/{order_item_id}",
                        web::patch().to(update_order_item),
                    )
                    .route("/invoices", web::get().to(list_invoices))
                    .route("/invoices", web::post().to(create_invoice))
                    .route("/invoices/{invoice_id}", web::get().to(get_invoice))
                    .route("/invoices/{invoice_id}", web::patch().to(update_invoice)),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
