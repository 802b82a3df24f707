use std::io::Write;

use crate::ast::Value;
use crate::error::QuarryResult;
use crate::transpiler::{Dialect, Express};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStrength {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

impl LockStrength {
    fn keyword(&self) -> &'static str {
        match self {
            LockStrength::Update => "FOR UPDATE",
            LockStrength::NoKeyUpdate => "FOR NO KEY UPDATE",
            LockStrength::Share => "FOR SHARE",
            LockStrength::KeyShare => "FOR KEY SHARE",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockWait {
    #[default]
    Wait,
    NoWait,
    SkipLocked,
}

/// Row locking. Present once a strength is chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lock {
    pub strength: Option<LockStrength>,
    pub tables: Vec<String>,
    pub wait: LockWait,
}

impl Lock {
    pub fn is_present(&self) -> bool {
        self.strength.is_some()
    }
}

impl Express for Lock {
    fn express(&self, w: &mut dyn Write, d: &dyn Dialect, _start: usize) -> QuarryResult<Vec<Value>> {
        let Some(strength) = self.strength else {
            return Ok(Vec::new());
        };

        w.write_all(strength.keyword().as_bytes())?;
        if !self.tables.is_empty() {
            let tables: Vec<String> = self.tables.iter().map(|t| d.quote_identifier(t)).collect();
            write!(w, " OF {}", tables.join(", "))?;
        }
        match self.wait {
            LockWait::Wait => {}
            LockWait::NoWait => w.write_all(b" NOWAIT")?,
            LockWait::SkipLocked => w.write_all(b" SKIP LOCKED")?,
        }
        Ok(Vec::new())
    }
}
