// Reconciliation commands
pub mod apply;
pub mod status;

// Discovery commands
pub mod list;
pub mod networks;

// Direct mutation
pub mod destroy;
