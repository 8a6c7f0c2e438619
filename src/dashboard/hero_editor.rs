use crate::model::HeroData;
use crate::repository::Portfolio;
use std::time::{Duration, Instant};

/// How long the "saved" banner stays up
pub const SUCCESS_BANNER: Duration = Duration::from_secs(3);

pub const SAVE_FAILED: &str = "Error al guardar los cambios";

/// Profile editor: one form, a saving flag and a timed success banner
#[derive(Debug, Clone, Default)]
pub struct HeroEditor {
    form: HeroData,
    saving: bool,
    saved_at: Option<Instant>,
    alert: Option<String>,
}

impl HeroEditor {
    pub fn new(initial: Option<HeroData>) -> Self {
        Self {
            form: initial.unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn form(&self) -> &HeroData {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut HeroData {
        &mut self.form
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Mark a save in flight; refused while one already is
    pub fn begin_save(&mut self) -> bool {
        if self.saving {
            return false;
        }
        self.saving = true;
        self.saved_at = None;
        self.alert = None;
        true
    }

    pub fn finish_save(&mut self, result: crate::Result<()>, now: Instant) {
        self.saving = false;
        match result {
            Ok(()) => self.saved_at = Some(now),
            Err(e) => {
                tracing::error!("Failed to save hero: {}", e);
                self.alert = Some(SAVE_FAILED.to_string());
            }
        }
    }

    /// Save the form as the new hero. The form is kept either way.
    pub fn save(&mut self, portfolio: &Portfolio, now: Instant) -> Result<(), String> {
        if !self.begin_save() {
            return Err("save already in progress".to_string());
        }
        let result = portfolio.save_hero(&self.form);
        self.finish_save(result, now);
        match &self.alert {
            Some(alert) => Err(alert.clone()),
            None => Ok(()),
        }
    }

    pub fn banner_visible(&self, now: Instant) -> bool {
        self.saved_at
            .is_some_and(|at| now.saturating_duration_since(at) < SUCCESS_BANNER)
    }
}
