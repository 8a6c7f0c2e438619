use super::{EditorForm, EditorMode, Editable};
use crate::repository::Portfolio;

/// Result of submitting a list form
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    Added(T),
    Updated(String),
    /// The store rejected the write; carries the alert text
    Rejected(String),
    /// Submitted while idle
    NothingToSubmit,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// The user did not confirm; nothing was called
    Cancelled,
    Deleted,
    Rejected(String),
}

/// Add/edit/delete manager over one list of the portfolio
pub struct ListManager<T: Editable> {
    items: Vec<T>,
    mode: EditorMode,
    form: T::Form,
    alert: Option<String>,
}

impl<T: Editable> ListManager<T> {
    /// Start idle over `items`; entries without an id are not shown
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter().filter(|item| !item.id().is_empty()).collect(),
            mode: EditorMode::Idle,
            form: T::Form::default(),
            alert: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn form(&self) -> &T::Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut T::Form {
        &mut self.form
    }

    pub fn set_form(&mut self, form: T::Form) {
        self.form = form;
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn shows_add_control(&self) -> bool {
        self.mode == EditorMode::Idle
    }

    /// Idle → Adding with a blank form
    pub fn start_adding(&mut self) -> bool {
        if self.mode != EditorMode::Idle {
            return false;
        }
        self.form = T::Form::default();
        self.alert = None;
        self.mode = EditorMode::Adding;
        true
    }

    /// Open the form pre-filled from the item with `id`
    pub fn start_editing(&mut self, id: &str) -> bool {
        let Some(item) = self.items.iter().find(|item| item.id() == id) else {
            return false;
        };
        self.form = T::Form::from_draft(item.to_draft());
        self.alert = None;
        self.mode = EditorMode::Editing(id.to_string());
        true
    }

    /// Back to idle, discarding the form
    pub fn cancel(&mut self) {
        self.form = T::Form::default();
        self.alert = None;
        self.mode = EditorMode::Idle;
    }

    /// Send the form to the store.
    ///
    /// On success the manager returns to idle and re-reads its list. On
    /// failure the mode and form are kept and an alert is raised.
    pub fn submit(&mut self, portfolio: &Portfolio) -> Submission<T> {
        let noun = T::LIST.noun();
        let draft = self.form.to_draft();

        let outcome = match &self.mode {
            EditorMode::Idle => return Submission::NothingToSubmit,
            EditorMode::Adding => match portfolio.add_item::<T>(draft) {
                Ok(item) => Submission::Added(item),
                Err(e) => {
                    tracing::error!("Failed to add {}: {}", noun, e);
                    Submission::Rejected(format!("Error al agregar {}", noun))
                }
            },
            EditorMode::Editing(id) => {
                let item = T::from_draft(id.clone(), draft);
                match portfolio.update_item(&item) {
                    Ok(_) => Submission::Updated(id.clone()),
                    Err(e) => {
                        tracing::error!("Failed to update {} {}: {}", noun, id, e);
                        Submission::Rejected(format!("Error al actualizar {}", noun))
                    }
                }
            }
        };

        match &outcome {
            Submission::Rejected(alert) => self.alert = Some(alert.clone()),
            _ => {
                self.cancel();
                self.reload(portfolio);
            }
        }
        outcome
    }

    /// Remove the item with `id` once the user has confirmed
    pub fn delete(&mut self, portfolio: &Portfolio, id: &str, confirmed: bool) -> Deletion {
        if !confirmed {
            return Deletion::Cancelled;
        }
        match portfolio.remove_item::<T>(id) {
            Ok(_) => {
                self.alert = None;
                self.reload(portfolio);
                Deletion::Deleted
            }
            Err(e) => {
                tracing::error!("Failed to delete {} {}: {}", T::LIST.noun(), id, e);
                let alert = format!("Error al eliminar {}", T::LIST.noun());
                self.alert = Some(alert.clone());
                Deletion::Rejected(alert)
            }
        }
    }

    /// Re-read the list; a failed read keeps what is shown
    fn reload(&mut self, portfolio: &Portfolio) {
        match portfolio.list::<T>() {
            Ok(items) => {
                self.items = items.into_iter().filter(|item| !item.id().is_empty()).collect();
            }
            Err(e) => tracing::error!("Failed to reload {}: {}", T::LIST, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::ProjectForm;
    use crate::model::{Experience, PortfolioRecord, Project, Skill, SkillDraft};

    fn skill(id: &str, name: &str) -> Skill {
        Skill {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            level: "Intermedio".into(),
        }
    }

    fn seeded(skills: Vec<Skill>) -> Portfolio {
        let portfolio = Portfolio::open_in_memory().unwrap();
        portfolio
            .create_record(&PortfolioRecord {
                skills,
                ..PortfolioRecord::default()
            })
            .unwrap();
        portfolio
    }

    #[test]
    fn test_transitions() {
        let mut manager = ListManager::new(vec![skill("1", "Rust")]);
        assert_eq!(manager.mode(), &EditorMode::Idle);
        assert!(manager.shows_add_control());

        assert!(manager.start_adding());
        assert_eq!(manager.mode(), &EditorMode::Adding);
        assert!(!manager.shows_add_control());
        assert!(!manager.start_adding());

        manager.cancel();
        assert_eq!(manager.mode(), &EditorMode::Idle);

        assert!(manager.start_editing("1"));
        assert_eq!(manager.mode(), &EditorMode::Editing("1".into()));
        assert_eq!(manager.form().name, "Rust");
        assert!(!manager.shows_add_control());

        assert!(!manager.start_editing("missing"));
        assert_eq!(manager.mode(), &EditorMode::Editing("1".into()));
    }

    #[test]
    fn test_items_without_id_are_hidden() {
        let manager = ListManager::new(vec![skill("", "Ghost"), skill("2", "Go")]);
        assert_eq!(manager.items().len(), 1);
        assert_eq!(manager.items()[0].name, "Go");
    }

    #[test]
    fn test_submit_add_returns_to_idle_and_reloads() {
        let portfolio = seeded(vec![skill("1", "Rust")]);
        let mut manager = ListManager::new(portfolio.list::<Skill>().unwrap());

        manager.start_adding();
        *manager.form_mut() = SkillDraft {
            name: "Go".into(),
            icon: "🐹".into(),
            level: "Básico".into(),
        };
        let outcome = manager.submit(&portfolio);

        assert!(matches!(outcome, Submission::Added(ref s) if s.name == "Go"));
        assert_eq!(manager.mode(), &EditorMode::Idle);
        assert_eq!(manager.items().len(), 2);
        assert_eq!(manager.form(), &SkillDraft::default());
    }

    #[test]
    fn test_submit_edit_updates_item() {
        let portfolio = seeded(vec![skill("1", "Rust"), skill("2", "Go")]);
        let mut manager = ListManager::new(portfolio.list::<Skill>().unwrap());

        manager.start_editing("2");
        manager.form_mut().level = "Avanzado".into();
        assert_eq!(manager.submit(&portfolio), Submission::Updated("2".into()));
        assert_eq!(manager.items()[1].level, "Avanzado");
        assert_eq!(manager.items()[0], skill("1", "Rust"));
    }

    #[test]
    fn test_rejected_submit_keeps_form_and_mode() {
        // No record: the store rejects the append
        let portfolio = Portfolio::open_in_memory().unwrap();
        let mut manager: ListManager<Experience> = ListManager::new(Vec::new());

        manager.start_adding();
        manager.form_mut().position = "Dev".into();
        let outcome = manager.submit(&portfolio);

        assert_eq!(outcome, Submission::Rejected("Error al agregar experiencia".into()));
        assert_eq!(manager.alert(), Some("Error al agregar experiencia"));
        assert_eq!(manager.mode(), &EditorMode::Adding);
        assert_eq!(manager.form().position, "Dev");
    }

    #[test]
    fn test_submit_while_idle_does_nothing() {
        let portfolio = seeded(Vec::new());
        let mut manager: ListManager<Skill> = ListManager::new(Vec::new());
        assert_eq!(manager.submit(&portfolio), Submission::NothingToSubmit);
        assert!(portfolio.list::<Skill>().unwrap().is_empty());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let portfolio = seeded(vec![skill("1", "Rust")]);
        let mut manager = ListManager::new(portfolio.list::<Skill>().unwrap());

        assert_eq!(manager.delete(&portfolio, "1", false), Deletion::Cancelled);
        assert_eq!(portfolio.list::<Skill>().unwrap().len(), 1);

        assert_eq!(manager.delete(&portfolio, "1", true), Deletion::Deleted);
        assert!(manager.items().is_empty());
        assert!(portfolio.list::<Skill>().unwrap().is_empty());
    }

    #[test]
    fn test_delete_unknown_project_is_quiet() {
        let portfolio = Portfolio::open_in_memory().unwrap();
        portfolio.create_record(&PortfolioRecord::default()).unwrap();
        let mut manager: ListManager<Project> = ListManager::new(Vec::new());
        assert_eq!(manager.delete(&portfolio, "nope", true), Deletion::Deleted);
        assert!(manager.alert().is_none());
    }

    #[test]
    fn test_project_form_tags_survive_submit() {
        let portfolio = Portfolio::open_in_memory().unwrap();
        portfolio.create_record(&PortfolioRecord::default()).unwrap();
        let mut manager: ListManager<Project> = ListManager::new(Vec::new());

        manager.start_adding();
        let form: &mut ProjectForm = manager.form_mut();
        form.draft_mut().name = "Folio".into();
        form.set_tech_input("Rust");
        form.add_technology();
        form.set_tech_input("Axum");
        form.add_technology();

        let outcome = manager.submit(&portfolio);
        assert!(matches!(outcome, Submission::Added(_)));
        let stored = portfolio.list::<Project>().unwrap();
        assert_eq!(stored[0].technologies, vec!["Rust".to_string(), "Axum".to_string()]);
    }
}
