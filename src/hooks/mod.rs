//! Post-call hooks invoked by the gateway

mod dispatcher;


pub use dispatcher::HookDispatcher;
