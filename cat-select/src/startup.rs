use crate::Selector;

/// Resolve which selector actually drives a `find_next` call, per spec
/// §4.4's start-up policy.
///
/// An ad-hoc `call_override` (if given) always wins. Otherwise, while
/// `n_responses_so_far < n_start_items` the session's configured
/// `start_select` overrides the normal selector; once enough start items
/// have been administered, `normal` applies.
pub fn effective_selector(
    normal: Selector,
    start_select: Selector,
    n_start_items: usize,
    n_responses_so_far: usize,
    call_override: Option<Selector>,
) -> Selector {
    if let Some(selector) = call_override {
        return selector;
    }
    if n_responses_so_far < n_start_items {
        start_select
    } else {
        normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_start_selector_before_threshold() {
        let s = effective_selector(Selector::Mfi, Selector::Random, 3, 1, None);
        assert_eq!(s, Selector::Random);
    }

    #[test]
    fn uses_normal_selector_at_and_after_threshold() {
        let s = effective_selector(Selector::Mfi, Selector::Random, 3, 3, None);
        assert_eq!(s, Selector::Mfi);
    }

    #[test]
    fn call_override_always_wins() {
        let s = effective_selector(Selector::Mfi, Selector::Random, 3, 0, Some(Selector::Fixed));
        assert_eq!(s, Selector::Fixed);
    }
}
