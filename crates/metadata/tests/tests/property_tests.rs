#[path = "property/scope_authority.rs"]
mod scope_authority;

#[path = "property/record_immutability.rs"]
mod record_immutability;

#[path = "property/record_shape.rs"]
mod record_shape;

#[path = "property/audit_immutability.rs"]
mod audit_immutability;
