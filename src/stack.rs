//! Keeping deep recursion off the end of the stack.

/// Minimum stack space to keep available.
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate each time more is needed.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first moving onto a freshly allocated stack segment if the
/// current one is nearly used up. Wrap each step of a recursion whose
/// depth follows the input.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(test)]
mod check {
    use super::*;

    fn depth(n: usize) -> usize {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
    }

    #[test]
    fn deep_recursion_survives() {
        assert_eq!(depth(200_000), 200_000);
    }
}
