use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest, SessionToken},
        dashboard::DashboardView,
        orders::{OrderAction, OrderActionRequest, OrderDetail, OrderList},
        products::{CreateProductRequest, ProductList, ProductPatch},
        users::{UserDirectory, UserSummary},
    },
    models::{BotSettings, Order, Product, Statistics, User},
    response::{ApiResponse, Meta},
    routes::{auth, dashboard, health, orders, params, products, settings, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    // the bearer credential is the opaque session id from /api/auth/login
                    .bearer_format("uuid")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::logout,
        dashboard::dashboard,
        orders::list_orders,
        orders::get_order,
        orders::apply_action,
        users::list_users,
        users::get_user,
        users::toggle_block,
        products::list_products,
        products::create_product,
        products::update_product,
        settings::get_settings,
        settings::save_settings
    ),
    components(
        schemas(
            User,
            Order,
            Product,
            BotSettings,
            Statistics,
            LoginRequest,
            RegisterRequest,
            SessionToken,
            DashboardView,
            OrderAction,
            OrderActionRequest,
            OrderDetail,
            OrderList,
            CreateProductRequest,
            ProductPatch,
            ProductList,
            UserDirectory,
            UserSummary,
            params::OrderListQuery,
            params::UserListQuery,
            Meta,
            ApiResponse<OrderList>,
            ApiResponse<OrderDetail>,
            ApiResponse<ProductList>,
            ApiResponse<UserDirectory>,
            ApiResponse<BotSettings>,
            ApiResponse<DashboardView>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Admin session endpoints"),
        (name = "Dashboard", description = "Statistics snapshot"),
        (name = "Orders", description = "Order management"),
        (name = "Users", description = "User directory"),
        (name = "Products", description = "Product management"),
        (name = "Settings", description = "Bot settings"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
