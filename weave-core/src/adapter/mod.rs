mod axum_adapter;
pub use self::axum_adapter::AxumAdapter;

mod axum_route_adapter;
pub use self::axum_route_adapter::AxumRouteAdapter;

mod route_adapter;
pub use self::route_adapter::RouteAdapter;
