use leptos::Owner;

/// Runs `f` under `owner` once an async call has finished. The owner is
/// captured before the `.await`; if the component has been unmounted in the
/// meantime the result is dropped and logged.
pub fn with_owner_safe<F, R>(owner: Option<Owner>, log_context: &str, f: F) -> Option<R>
where
    F: FnOnce() -> R,
{
    let Some(owner) = owner else {
        leptos::logging::log!("[OWNER] No Leptos owner in context: {}", log_context);
        return None;
    };
    match leptos::try_with_owner(owner, f) {
        Ok(value) => Some(value),
        Err(_) => {
            leptos::logging::log!("[OWNER] Owner disposed before {}", log_context);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::*;

    #[test]
    fn test_runs_under_live_owner_and_skips_without_one() {
        let runtime = create_runtime();

        assert_eq!(with_owner_safe(None, "no owner", || 1), None);

        if let Some(owner) = Owner::current() {
            assert_eq!(with_owner_safe(Some(owner), "live owner", || 2), Some(2));
        }

        runtime.dispose();
    }
}
