//! The signed-in operator, as recorded in the session.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_OPERATOR_KEY: &str = "orderdesk:operator:id";

/// Operator ID as stored in the session record
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct StoredOperatorId(pub String);

pub struct SessionOperator;

impl SessionOperator {
    /// Records `user_id` as the signed-in operator under a fresh session ID
    pub async fn sign_in(session: &Session, user_id: i32) -> Result<(), Error> {
        session.cycle_id().await?;
        session
            .insert(SESSION_OPERATOR_KEY, StoredOperatorId(user_id.to_string()))
            .await?;

        Ok(())
    }

    /// ID of the signed-in operator, if any
    pub async fn current(session: &Session) -> Result<Option<i32>, Error> {
        let Some(StoredOperatorId(raw)) = session
            .get::<StoredOperatorId>(SESSION_OPERATOR_KEY)
            .await?
        else {
            return Ok(None);
        };

        raw.parse::<i32>().map(Some).map_err(|e| {
            Error::ParseError(format!("Invalid operator ID {:?} in session: {}", raw, e))
        })
    }

    /// Drops all session data, returning whether an operator was signed in
    ///
    /// Clearing a session that holds no data fails, so an empty session is left alone.
    pub async fn sign_out(session: &Session) -> Result<bool, Error> {
        if Self::current(session).await?.is_none() {
            return Ok(false);
        }

        session.clear().await;

        Ok(true)
    }
}
