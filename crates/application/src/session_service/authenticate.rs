use casaflow_core::{ACCESS_RESTRICTED_CODE, ClientError, ClientResult};
use casaflow_domain::{
    Credentials, PermissionSet, SignInResponse, TokenSignInRequest, decode_permission_claim,
    decode_token_claims, token_expired,
};

use super::{SessionEstablished, SessionService};

impl SessionService {
    /// Authenticates with email and password and establishes the session.
    ///
    /// Fails with [`ClientError::AlreadyAuthenticated`] when a session is
    /// already active. A backend failure carrying the restricted-company
    /// code maps to [`ClientError::AccessRestricted`] so the caller opens
    /// the blocking restricted-access flow instead of the generic error
    /// path.
    pub async fn sign_in(&self, credentials: Credentials) -> ClientResult<SessionEstablished> {
        if self.is_authenticated() {
            return Err(ClientError::AlreadyAuthenticated);
        }

        credentials.validate()?;

        let response: SignInResponse = self
            .api
            .post("user/sign-in", &credentials)
            .await
            .map_err(map_restricted)?;

        Ok(self.establish(response))
    }

    /// Attempts silent re-authentication from the persisted token.
    ///
    /// A liveness probe, not an error path: every failure (missing token,
    /// network trouble, rejection, the restricted signal) resolves `false`.
    pub async fn sign_in_with_token(&self) -> bool {
        let Some(token) = self.token_store.get() else {
            return false;
        };

        let request = TokenSignInRequest { token };
        let response: ClientResult<SignInResponse> =
            self.api.post("user/sign-in-with-token", &request).await;

        match response {
            Ok(response) => {
                self.establish(response);
                true
            }
            Err(error) => {
                tracing::debug!(error = %error, "silent re-authentication failed");
                false
            }
        }
    }

    /// Resolves whether a usable session exists, without surfacing errors.
    ///
    /// Short-circuits on in-memory state, then on a missing or locally
    /// expired persisted token (no network call), and only then probes the
    /// backend via [`Self::sign_in_with_token`].
    pub async fn check_session(&self) -> bool {
        if self.is_authenticated() {
            return true;
        }

        let Some(token) = self.token_store.get() else {
            return false;
        };

        if token_expired(&token) {
            return false;
        }

        self.sign_in_with_token().await
    }

    /// Re-issues the token exchange so permission changes made for the
    /// current user land without a logout.
    pub async fn refresh_permissions(&self) -> ClientResult<SessionEstablished> {
        let token = self
            .token_store
            .get()
            .ok_or(ClientError::NotAuthenticated)?;

        let request = TokenSignInRequest { token };
        let response: SignInResponse = self.api.post("user/sign-in-with-token", &request).await?;

        Ok(self.establish(response))
    }

    /// Adopts a sign-in response wholesale: persists the (possibly rotated)
    /// token, replaces the grant set, publishes the user, and flips the
    /// flag. Settings are prefetched as a fire-and-forget side effect.
    fn establish(&self, response: SignInResponse) -> SessionEstablished {
        let permissions = decode_grants(&response.token);

        self.token_store.set(&response.token);
        self.state.permissions.send_replace(permissions.clone());
        self.state.user.send_replace(Some(response.user.clone()));
        self.state.authenticated.send_replace(true);

        self.settings.prefetch();

        SessionEstablished {
            user: response.user,
            permissions,
        }
    }
}

/// Decodes the permission claim out of a token.
///
/// Missing or malformed claims yield an empty grant set; establishing the
/// session never fails on them.
fn decode_grants(token: &str) -> PermissionSet {
    let claims = match decode_token_claims(token) {
        Ok(claims) => claims,
        Err(error) => {
            tracing::warn!(error = %error, "token payload undecodable, granting no permissions");
            return PermissionSet::empty();
        }
    };

    let Some(claim) = claims.permissions else {
        tracing::warn!("token carries no permission claim, granting no permissions");
        return PermissionSet::empty();
    };

    match decode_permission_claim(&claim) {
        Ok(permissions) => permissions,
        Err(error) => {
            tracing::warn!(error = %error, "permission claim undecodable, granting no permissions");
            PermissionSet::empty()
        }
    }
}

fn map_restricted(error: ClientError) -> ClientError {
    match error {
        ClientError::Api { code, message, .. }
            if code.as_deref() == Some(ACCESS_RESTRICTED_CODE) =>
        {
            ClientError::AccessRestricted(message)
        }
        other => other,
    }
}
