//! # Swap Request Inbox
//!
//! Incoming requests (on the viewer's items) and outgoing ones (the viewer's
//! own proposals). Only the item owner can settle a pending incoming request.
//! A row's status changes only after the server confirms, and an accepted swap
//! re-fetches the session user since the point ledger moved server-side.

use std::sync::Arc;

use parking_lot::Mutex;
use shared::{ItemStatus, SwapRequest, SwapRequestId, SwapStatus};

use super::notifications::Notifier;
use super::optimistic::Staged;
use super::session::Session;
use crate::core::error::{AppError, Result};
use crate::core::service::MarketplaceApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRow {
    pub request: SwapRequest,
    pub busy: bool,
}

#[derive(Debug, Default)]
struct InboxState {
    loaded: bool,
    incoming: Vec<IncomingRow>,
    outgoing: Vec<SwapRequest>,
}

pub struct SwapInbox {
    api: Arc<dyn MarketplaceApi>,
    session: Arc<Session>,
    notifier: Notifier,
    state: Mutex<InboxState>,
}

impl SwapInbox {
    pub fn new(api: Arc<dyn MarketplaceApi>, session: Arc<Session>, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
            state: Mutex::new(InboxState::default()),
        }
    }

    pub async fn load(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            return Err(AppError::Access("Please sign in to see swap requests.".to_string()));
        }

        match self.api.list_swap_requests().await {
            Ok(inbox) => {
                let mut state = self.state.lock();
                let in_flight: Vec<SwapRequestId> = state
                    .incoming
                    .iter()
                    .filter(|row| row.busy)
                    .map(|row| row.request.id)
                    .collect();
                state.incoming = inbox
                    .incoming
                    .into_iter()
                    .map(|request| IncomingRow {
                        busy: in_flight.contains(&request.id),
                        request,
                    })
                    .collect();
                state.outgoing = inbox.outgoing;
                state.loaded = true;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .error("Error", e.user_message("Failed to load swap requests."));
                Err(e.into())
            }
        }
    }

    pub async fn accept(&self, id: SwapRequestId) -> Result<()> {
        self.respond(id, true).await
    }

    pub async fn reject(&self, id: SwapRequestId) -> Result<()> {
        self.respond(id, false).await
    }

    #[tracing::instrument(skip(self))]
    async fn respond(&self, id: SwapRequestId, accept: bool) -> Result<()> {
        let user_id = self
            .session
            .user_id()
            .ok_or_else(|| {
                AppError::Access("Please sign in to respond to swap requests.".to_string())
            })?;

        let staged = {
            let mut state = self.state.lock();
            let row = state
                .incoming
                .iter_mut()
                .find(|row| row.request.id == id)
                .ok_or_else(|| {
                    AppError::State(format!("Swap request {id} is not in your inbox."))
                })?;
            if row.request.owner_id != user_id {
                return Err(AppError::Access("Only the item owner can respond.".to_string()));
            }
            if row.request.status != SwapStatus::Pending || row.busy {
                return Err(AppError::State(format!("Swap request {id} is not pending.")));
            }
            Staged::begin(&mut row.busy, |busy| *busy = true)
        };

        let result = if accept {
            self.api.accept_swap_request(id).await
        } else {
            self.api.reject_swap_request(id).await
        };

        match result {
            Ok(reply) => {
                let status = reply
                    .data
                    .as_ref()
                    .map(|request| request.status)
                    .unwrap_or(if accept {
                        SwapStatus::Accepted
                    } else {
                        SwapStatus::Rejected
                    });
                {
                    let mut state = self.state.lock();
                    if let Some(row) = state.incoming.iter_mut().find(|row| row.request.id == id) {
                        staged.commit(&mut row.busy, |busy| *busy = false);
                        row.request.status = status;
                        if accept {
                            if let Some(item) = row.request.item.as_mut() {
                                item.status = ItemStatus::Swapped;
                            }
                        }
                    }
                }

                if accept {
                    self.session.refresh_user().await;
                    self.notifier.info(
                        "Swap Accepted",
                        reply
                            .message
                            .unwrap_or_else(|| "The swap request has been accepted.".to_string()),
                    );
                } else {
                    self.notifier.info(
                        "Swap Rejected",
                        reply
                            .message
                            .unwrap_or_else(|| "The swap request has been rejected.".to_string()),
                    );
                }
                Ok(())
            }
            Err(e) => {
                if let Some(row) = self
                    .state
                    .lock()
                    .incoming
                    .iter_mut()
                    .find(|row| row.request.id == id)
                {
                    staged.rollback(&mut row.busy);
                }
                let fallback = if accept {
                    "Failed to accept swap request"
                } else {
                    "Failed to reject swap request"
                };
                self.notifier.error("Error", e.user_message(fallback));
                Err(e.into())
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state.lock().loaded
    }

    pub fn incoming(&self) -> Vec<IncomingRow> {
        self.state.lock().incoming.clone()
    }

    pub fn outgoing(&self) -> Vec<SwapRequest> {
        self.state.lock().outgoing.clone()
    }

    pub fn pending_incoming(&self) -> usize {
        self.state
            .lock()
            .incoming
            .iter()
            .filter(|row| row.request.status == SwapStatus::Pending)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notifications::{drain, Toast};
    use crate::core::mock::{self, MockApi};
    use shared::SwapInboxPayload;
    use std::time::Duration;

    fn request(id: SwapRequestId, requester_id: i64, owner_id: i64) -> SwapRequest {
        SwapRequest {
            id,
            item_id: 100 + id,
            requester_id,
            owner_id,
            points_offered: Some(20),
            message: None,
            status: SwapStatus::Pending,
            created_at: None,
            item: Some(mock::item(100 + id, owner_id, 20, ItemStatus::Approved)),
            requester: None,
        }
    }

    async fn inbox_for(
        api: &Arc<MockApi>,
        user_id: i64,
    ) -> (SwapInbox, Arc<Session>, async_channel::Receiver<Toast>) {
        let (notifier, rx) = Notifier::channel();
        api.current_user.push(Ok(mock::user(user_id, 10)));
        let session = Arc::new(Session::new(api.clone(), notifier.clone()));
        session.initialize().await;
        api.swap_inbox.push(Ok(SwapInboxPayload {
            incoming: vec![request(1, 9, user_id), request(2, 8, user_id)],
            outgoing: vec![request(3, user_id, 7)],
        }));
        let inbox = SwapInbox::new(api.clone(), session.clone(), notifier);
        inbox.load().await.unwrap();
        (inbox, session, rx)
    }

    #[tokio::test]
    async fn test_accept_updates_status_and_refreshes_balance() {
        let api = Arc::new(MockApi::new());
        let (inbox, session, rx) = inbox_for(&api, 4).await;
        api.accept_swap.push(Ok(mock::reply("Swap request accepted", None)));
        api.current_user.push(Ok(mock::user(4, 30)));

        inbox.accept(1).await.unwrap();

        let row = &inbox.incoming()[0];
        assert_eq!(row.request.status, SwapStatus::Accepted);
        assert_eq!(row.request.item.as_ref().map(|item| item.status), Some(ItemStatus::Swapped));
        assert_eq!(session.points(), Some(30));
        assert_eq!(inbox.pending_incoming(), 1);
        assert_eq!(drain(&rx).last().unwrap().title, "Swap Accepted");
    }

    #[tokio::test]
    async fn test_failed_reject_keeps_request_pending() {
        let api = Arc::new(MockApi::new());
        let (inbox, _session, rx) = inbox_for(&api, 4).await;
        api.reject_swap.push(Err(mock::http(500, None)));

        assert!(inbox.reject(2).await.is_err());
        let row = &inbox.incoming()[1];
        assert_eq!(row.request.status, SwapStatus::Pending);
        assert!(!row.busy);
        assert_eq!(drain(&rx).last().unwrap().description, "Failed to reject swap request");
        assert_eq!(api.count("current_user"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_accept_keeps_request_reloaded_meanwhile() {
        let api = Arc::new(MockApi::new());
        let (inbox, _session, _rx) = inbox_for(&api, 4).await;
        api.accept_swap.push_delayed(Duration::from_millis(200), Err(mock::http(500, None)));
        let mut reloaded = request(1, 9, 4);
        reloaded.message = Some("Can meet on Saturday".to_string());
        api.swap_inbox.push_delayed(
            Duration::from_millis(50),
            Ok(SwapInboxPayload {
                incoming: vec![reloaded],
                outgoing: Vec::new(),
            }),
        );

        let (accepted, loaded) = tokio::join!(inbox.accept(1), inbox.load());

        assert!(accepted.is_err());
        assert!(loaded.is_ok());
        let row = &inbox.incoming()[0];
        assert_eq!(row.request.message.as_deref(), Some("Can meet on Saturday"));
        assert_eq!(row.request.status, SwapStatus::Pending);
        assert!(!row.busy);
    }

    #[tokio::test]
    async fn test_settled_or_unknown_requests_are_refused() {
        let api = Arc::new(MockApi::new());
        let (inbox, _session, _rx) = inbox_for(&api, 4).await;
        api.reject_swap.push(Ok(mock::reply("Swap request rejected", None)));

        inbox.reject(2).await.unwrap();
        assert!(matches!(inbox.reject(2).await, Err(AppError::State(_))));
        assert!(matches!(inbox.accept(3).await, Err(AppError::State(_))));
        assert_eq!(inbox.outgoing().len(), 1);
    }
}
