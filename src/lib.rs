// Module layout (Clean Architecture style)
// - bootstrap: configuration, security posture and startup wiring
// - infrastructure: DB adapters and schema registration
// - presentation: HTTP routing and the security filter chain
// - application: persistence ports
// - domain: entities and table descriptions

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
