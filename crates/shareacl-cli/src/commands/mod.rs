pub mod dispatch;
pub mod list;
pub mod normalize;
pub mod remove;
pub mod set_role;
pub mod share;
