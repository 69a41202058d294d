//! On-screen counter.

use std::fmt::Write;

/// `"{active}/{capacity}"`, as shown in the corner of the screen.
#[must_use]
pub fn counter_label(active: usize, capacity: usize) -> String {
    let mut label = String::new();
    write_counter(&mut label, active, capacity);
    label
}

/// Rewrites `label` in place, reusing its allocation.
pub fn write_counter(label: &mut String, active: usize, capacity: usize) {
    label.clear();
    // Writing to a String cannot fail
    let _ = write!(label, "{active}/{capacity}");
}
