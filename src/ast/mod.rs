//! Expression trees and bound values shared by every statement kind.

pub mod builders;
pub mod expr;
pub mod value;

pub use self::expr::{BinaryOp, Expr};
pub use self::value::Value;
