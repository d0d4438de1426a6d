//! Editable draft of the remote bot settings.

mod error;

pub use error::SettingsError;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{BotSettings, SettingsUpdate, StrategyType};
use crate::gateway::{Gateway, GatewayError};

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// `load` has not been called yet.
    NotLoaded,
    /// The last load failed. No draft is available.
    LoadFailed(GatewayError),
    /// Settings loaded. `baseline` is what the service holds.
    Ready {
        baseline: BotSettings,
        draft: BotSettings,
    },
}

/// SettingsSession holds one operator's draft of the bot settings.
///
/// Edits touch only the draft. `save` sends the whole draft and adopts
/// whatever the service echoes back.
pub struct SettingsSession {
    gateway: Arc<dyn Gateway>,
    state: SessionState,
}

impl SettingsSession {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            state: SessionState::NotLoaded,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current draft, if settings are loaded.
    pub fn draft(&self) -> Option<&BotSettings> {
        match &self.state {
            SessionState::Ready { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Settings as last confirmed by the service.
    pub fn baseline(&self) -> Option<&BotSettings> {
        match &self.state {
            SessionState::Ready { baseline, .. } => Some(baseline),
            _ => None,
        }
    }

    /// Fetches remote settings into a fresh draft, dropping any unsaved edits.
    pub async fn load(&mut self) -> Result<&BotSettings> {
        match self.gateway.settings().await {
            Ok(settings) => {
                debug!(risk = settings.risk_appetite, capital = settings.max_capital, "Settings loaded");
                self.state = SessionState::Ready {
                    baseline: settings.clone(),
                    draft: settings,
                };
                self.draft().ok_or(SettingsError::NotLoaded)
            }
            Err(e) => {
                warn!(error = %e, kind = %e.kind(), "Failed to load settings");
                self.state = SessionState::LoadFailed(e.clone());
                Err(e.into())
            }
        }
    }

    /// Sets risk appetite. Must be within [0, 1].
    pub fn set_risk_appetite(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(SettingsError::Validation(format!(
                "risk appetite must be between 0 and 1, got {}",
                value
            )));
        }
        self.draft_mut()?.risk_appetite = value;
        Ok(())
    }

    pub fn set_strategy_enabled(&mut self, strategy: StrategyType, enabled: bool) -> Result<()> {
        self.draft_mut()?.strategies_enabled.set(strategy, enabled);
        Ok(())
    }

    /// Sets the capital ceiling in USD. Must be finite and not negative.
    pub fn set_max_capital(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(SettingsError::Validation(format!(
                "max capital must be a non-negative amount, got {}",
                value
            )));
        }
        self.draft_mut()?.max_capital = value;
        Ok(())
    }

    /// Parses operator text such as "1500" or "$1,500.50" into max capital.
    pub fn set_max_capital_text(&mut self, input: &str) -> Result<()> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '$')
            .collect();
        let value: f64 = cleaned
            .parse()
            .map_err(|_| SettingsError::Validation(format!("max capital is not a number: {:?}", input)))?;
        self.set_max_capital(value)
    }

    /// Returns true if the draft differs from the baseline.
    pub fn is_dirty(&self) -> bool {
        match &self.state {
            SessionState::Ready { baseline, draft } => baseline != draft,
            _ => false,
        }
    }

    /// Reverts the draft to the baseline.
    pub fn discard(&mut self) {
        if let SessionState::Ready { baseline, draft } = &mut self.state {
            *draft = baseline.clone();
        }
    }

    /// Sends the full draft. On success the echoed settings become both the
    /// baseline and the draft. On failure the draft is left as it was.
    pub async fn save(&mut self) -> Result<&BotSettings> {
        let update = match &self.state {
            SessionState::Ready { draft, .. } => SettingsUpdate::from(draft),
            _ => return Err(SettingsError::NotLoaded),
        };

        let saved = match self.gateway.update_settings(&update).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, kind = %e.kind(), "Failed to save settings, draft kept");
                return Err(e.into());
            }
        };

        if Some(&saved) != self.draft() {
            info!("Service adjusted saved settings, resyncing draft");
        }
        info!(
            risk = saved.risk_appetite,
            capital = saved.max_capital,
            "Settings saved"
        );

        self.state = SessionState::Ready {
            baseline: saved.clone(),
            draft: saved,
        };
        self.draft().ok_or(SettingsError::NotLoaded)
    }

    fn draft_mut(&mut self) -> Result<&mut BotSettings> {
        match &mut self.state {
            SessionState::Ready { draft, .. } => Ok(draft),
            _ => Err(SettingsError::NotLoaded),
        }
    }
}
