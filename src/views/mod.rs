//! Built-in components: Text, Stack, Button.

use std::cell::Cell;

pub mod button;
pub mod stack;
pub mod text;

pub use button::Button;
pub use stack::{Axis, Stack};
pub use text::Text;

thread_local! {
    static NEXT_ID: Cell<u64> = const { Cell::new(1) };
}

/// Allocate an instance id like `"text-3"`.
pub(crate) fn next_id(prefix: &str) -> String {
    let n = NEXT_ID.with(|next| {
        let n = next.get();
        next.set(n + 1);
        n
    });
    format!("{prefix}-{n}")
}
