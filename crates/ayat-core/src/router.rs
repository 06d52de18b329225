//! Switches between the named views. Exactly one view is visible after a
//! successful navigation.

use crate::view::{ViewBinding, ViewId};

pub fn navigate_to<B: ViewBinding + ?Sized>(binding: &mut B, target: ViewId) {
    hide_all_except(binding, Some(target));
    binding.set_view_visible(target, true);
    binding.scroll_to_top();

    // Entering the lookup view always drops the previous verse
    if target == ViewId::Lookup {
        binding.set_result_visible(false);
        binding.set_empty_state_visible(true);
    }
}

/// Navigate by view name. An unknown name leaves every view hidden.
pub fn navigate_to_named<B: ViewBinding + ?Sized>(binding: &mut B, name: &str) -> Option<ViewId> {
    match ViewId::from_str(name) {
        Some(target) => {
            navigate_to(binding, target);
            Some(target)
        }
        None => {
            tracing::warn!(view = name, "unknown view, hiding all views");
            hide_all_except(binding, None);
            None
        }
    }
}

fn hide_all_except<B: ViewBinding + ?Sized>(binding: &mut B, keep: Option<ViewId>) {
    for view in ViewId::ALL {
        if Some(view) != keep {
            binding.set_view_visible(view, false);
        }
    }
}
