use std::sync::Arc;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::http_helpers::{HttpMethod, HttpRequest, HttpResponse, IntoResponse};
use crate::structs_helpers::EnhancerMetadata;

use crate::compiler::ParamBinding;

use super::provider::ProviderTrait;
use super::{Guard, Interceptor, Pipe, Validatable};

#[async_trait]
pub trait ControllerTrait: Send + Sync {
    fn get_token(&self) -> String;
    async fn execute(&self, req: HttpRequest) -> Box<dyn IntoResponse<Response = HttpResponse> + Send>;
    fn get_path(&self) -> String;
    fn get_method(&self) -> HttpMethod;

    /// The per-parameter binding analysis the route compiler turns into
    /// `CompiledRoute::param_infos`. Generated by `#[controller]`'s macro
    /// expansion from each handler argument's `#[body]`/`#[query]`/`#[param]`
    /// marker; empty for hand-written implementations.
    fn param_bindings(&self) -> Vec<ParamBinding> {
        Vec::new()
    }

    /// Whether this controller instance was built per-request (its scope
    /// bubbled to `Request`, or the generated elevation fallback was taken)
    /// rather than once at startup as a true singleton.
    fn is_request_scoped(&self) -> bool {
        false
    }

    /// Guards attached to this specific route via `#[use_guards]`. Generated by
    /// `#[controller]`'s macro expansion; empty by default for hand-written
    /// implementations.
    fn get_guards(&self) -> Vec<Arc<dyn Guard>> {
        Vec::new()
    }

    fn get_interceptors(&self) -> Vec<Arc<dyn Interceptor>> {
        Vec::new()
    }

    fn get_pipes(&self) -> Vec<Arc<dyn Pipe>> {
        Vec::new()
    }

    /// Parses and validates the body into the route's declared DTO, if any.
    /// Returns `None` for routes with no `#[body]` parameter.
    async fn get_body_dto(&self, _req: &HttpRequest) -> Option<Box<dyn Validatable>> {
        None
    }
}
pub trait Controller {
    fn get_all_controllers(
        &self,
        dependencies: &FxHashMap<String, Arc<Box<dyn ProviderTrait>>>,
    ) -> FxHashMap<String, Arc<Box<dyn ControllerTrait>>>;
    fn get_name(&self) -> String;
    fn get_token(&self) -> String;
    fn get_dependencies(&self) -> Vec<String>;

    /// Guards/pipes/interceptors attached directly to this controller's
    /// `#[use_guards]`/`#[use_pipes]`/`#[use_interceptors]` attributes. Empty
    /// unless the macro overrides this.
    fn get_enhancers(&self) -> EnhancerMetadata {
        EnhancerMetadata::default()
    }
}
