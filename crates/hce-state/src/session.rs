//! # Session Redirect Guard
//!
//! Keeps signed-in users off the auth page. On mount the guard subscribes
//! to session changes and then checks the current session; whenever a
//! session is present it navigates to the target. No session means no
//! action. Dropping the guard releases the subscription.

use std::sync::Arc;

use hce_adapter::{IdentityProvider, Navigator, Subscription};

/// Live guard for one mounted auth page.
#[derive(Debug)]
pub struct SessionGuard {
    subscription: Subscription,
}

impl SessionGuard {
    /// Subscribe, then redirect immediately if a session already exists.
    pub async fn mount(
        provider: Arc<dyn IdentityProvider>,
        navigator: Arc<dyn Navigator>,
        target: impl Into<String>,
    ) -> Self {
        let target = target.into();

        let on_change = {
            let navigator = navigator.clone();
            let target = target.clone();
            Arc::new(move |session: Option<hce_adapter::Session>| {
                if let Some(session) = session {
                    tracing::debug!(user_id = %session.user_id, target = %target, "session change, redirecting");
                    navigator.navigate(&target);
                }
            })
        };
        let subscription = provider.on_session_change(on_change);

        if let Some(session) = provider.get_session().await {
            tracing::debug!(user_id = %session.user_id, target = %target, "existing session, redirecting");
            navigator.navigate(&target);
        }

        Self { subscription }
    }

    /// Release the subscription now.
    pub fn unmount(self) {
        self.subscription.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeProvider, RecordingNavigator};
    use hce_adapter::Session;

    fn session() -> Session {
        Session {
            user_id: "user-1".to_string(),
            email: Some("jo@x.com".to_string()),
        }
    }

    #[tokio::test]
    async fn existing_session_redirects_on_mount() {
        let provider = Arc::new(FakeProvider::with_session(session()));
        let navigator = Arc::new(RecordingNavigator::default());
        let _guard = SessionGuard::mount(provider, navigator.clone(), "/").await;
        assert_eq!(navigator.targets(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn no_session_means_no_action() {
        let provider = Arc::new(FakeProvider::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let _guard = SessionGuard::mount(provider.clone(), navigator.clone(), "/").await;
        provider.emit(None);
        assert!(navigator.targets().is_empty());
    }

    #[tokio::test]
    async fn later_sign_in_redirects() {
        let provider = Arc::new(FakeProvider::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let _guard = SessionGuard::mount(provider.clone(), navigator.clone(), "/").await;
        provider.emit(Some(session()));
        assert_eq!(navigator.targets(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn dropping_the_guard_unsubscribes() {
        let provider = Arc::new(FakeProvider::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let guard = SessionGuard::mount(provider.clone(), navigator.clone(), "/").await;
        assert_eq!(provider.subscriber_count(), 1);

        drop(guard);
        assert_eq!(provider.subscriber_count(), 0);
        provider.emit(Some(session()));
        assert!(navigator.targets().is_empty());
    }

    #[tokio::test]
    async fn explicit_unmount_unsubscribes() {
        let provider = Arc::new(FakeProvider::default());
        let navigator = Arc::new(RecordingNavigator::default());
        SessionGuard::mount(provider.clone(), navigator, "/").await.unmount();
        assert_eq!(provider.subscriber_count(), 0);
    }
}
