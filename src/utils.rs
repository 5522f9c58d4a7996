/*
 * gladeui
 *
 * Copyright 2022 - Manos Pitsidianakis
 *
 * This file is part of gladeui.
 *
 * gladeui is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * gladeui is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with gladeui. If not, see <http://www.gnu.org/licenses/>.
 */

use std::cell::Cell;

pub mod colors;
pub mod signal;
pub use colors::*;
pub use signal::{Signal, SignalHandlerId};

/// Return value of hooks that can stop the default behaviour of an
/// operation: `Inhibit(true)` stops it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Inhibit(pub bool);

/// Raises a boolean flag for the lifetime of the guard and restores the
/// previous value when dropped, including on unwinding.
#[must_use]
pub struct FlagGuard<'a> {
    flag: &'a Cell<bool>,
    previous: bool,
}

impl<'a> FlagGuard<'a> {
    pub fn raise(flag: &'a Cell<bool>) -> Self {
        let previous = flag.replace(true);
        Self { flag, previous }
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

/// Replaces `from` with `to` in place, like `str::replace` for single chars.
pub fn replace_char(s: &str, from: char, to: char) -> String {
    s.chars().map(|c| if c == from { to } else { c }).collect()
}

#[test]
fn test_flag_guard_restores() {
    let flag = Cell::new(false);
    {
        let _outer = FlagGuard::raise(&flag);
        assert!(flag.get());
        {
            let _inner = FlagGuard::raise(&flag);
            assert!(flag.get());
        }
        assert!(flag.get());
    }
    assert!(!flag.get());

    let result = std::panic::catch_unwind(|| {
        let flag = Cell::new(false);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = FlagGuard::raise(&flag);
            panic!("unwind");
        }));
        assert!(outcome.is_err());
        flag.get()
    });
    assert_eq!(result.ok(), Some(false));
}
