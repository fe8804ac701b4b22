use crate::api::Services;
use crate::app::App;
use harvest::{LoadError, SubmitError, SubmitOutcome, Workbench};

use super::action_queue::Action;

/// What a finished action hands back: the workbench it ran on and its
/// result, ready to be applied to the app.
pub(super) enum Completed {
    Loaded(Workbench, Result<(), LoadError>),
    Submitted(Workbench, Result<SubmitOutcome, SubmitError>),
}

/// Run `action` on a detached copy of the workbench, so the app stays free
/// to redraw while the requests are in flight.
pub(super) async fn perform(action: Action, mut workbench: Workbench, services: &Services) -> Completed {
    match action {
        Action::LoadDataset => {
            let result = workbench.load_dataset(services.store.as_ref()).await;
            Completed::Loaded(workbench, result)
        }
        Action::Submit => {
            let result = workbench
                .submit(services.store.as_ref(), services.notifier.as_ref())
                .await;
            Completed::Submitted(workbench, result)
        }
    }
}

pub(super) fn apply(app: &mut App, completed: Completed) {
    app.is_loading = false;
    match completed {
        Completed::Loaded(workbench, result) => {
            app.workbench = workbench;
            match result {
                Ok(()) => app.reset_table(),
                Err(e) => app.toasts.error(e.to_string()),
            }
        }
        Completed::Submitted(workbench, result) => {
            app.workbench = workbench;
            app.submit_pending = false;
            submitted(app, result);
        }
    }
}

fn submitted(app: &mut App, result: Result<SubmitOutcome, SubmitError>) {
    match result {
        Ok(outcome) => {
            app.toasts.success(outcome.report.message());
            app.finish_form();
            match outcome.reload {
                Ok(()) => app.reset_table(),
                Err(e) => app.toasts.error(e.to_string()),
            }
        }
        Err(e) => {
            if let SubmitError::Halted {
                submitted,
                row,
                stage,
                cause,
            } = &e
            {
                tracing::error!(submitted, row, ?stage, %cause, "submission halted");
            }
            app.toasts.error(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::View;
    use crate::test_support::{sample_dataset, services, test_app, StubNotifier, StubSheet};
    use crate::toast::ToastLevel;
    use harvest::domain::DraftField;
    use std::sync::atomic::Ordering;
    use time::macros::date;

    async fn run_action(action: Action, app: &mut App, services: &Services) {
        app.is_loading = true;
        let completed = perform(action, app.workbench.clone(), services).await;
        apply(app, completed);
    }

    fn filled_form(app: &mut App) {
        app.open_form(date!(2024 - 04 - 03));
        app.workbench
            .update_draft_field(0, DraftField::RawWeight(Some(12.0)));
        app.workbench
            .update_draft_field(0, DraftField::SurfaceArea(Some(3.0)));
    }

    #[tokio::test]
    async fn load_failure_keeps_table_and_shows_toast() {
        let mut app = test_app();
        let ok = services(StubSheet::with(sample_dataset()), StubNotifier::default());
        run_action(Action::LoadDataset, &mut app, &ok).await;
        assert_eq!(app.workbench.dataset().rows.len(), 2);

        let failing = services(
            StubSheet {
                fail_fetch: true,
                ..StubSheet::default()
            },
            StubNotifier::default(),
        );
        run_action(Action::LoadDataset, &mut app, &failing).await;

        assert_eq!(app.workbench.dataset().rows.len(), 2);
        let toast = app.toasts.latest().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(toast.message, "Impossible de charger les données de la feuille");
        assert!(!app.is_loading);
    }

    #[tokio::test]
    async fn successful_submit_closes_form_and_reports_count() {
        let sheet = StubSheet::with(sample_dataset());
        let notifier = StubNotifier::default();
        let svc = services(sheet.clone(), notifier.clone());
        let mut app = test_app();
        filled_form(&mut app);
        app.submit_pending = true;

        run_action(Action::Submit, &mut app, &svc).await;

        assert!(!app.submit_pending);
        assert!(app.form.is_none());
        assert_eq!(app.current_view, View::Table);
        assert_eq!(app.toasts.visible().next().unwrap().message, "1 entrées ajoutées avec succès");
        assert_eq!(sheet.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_submit_keeps_form_open() {
        let sheet = StubSheet {
            fail_append: true,
            ..StubSheet::default()
        };
        let notifier = StubNotifier::default();
        let svc = services(sheet.clone(), notifier.clone());
        let mut app = test_app();
        filled_form(&mut app);
        app.submit_pending = true;

        run_action(Action::Submit, &mut app, &svc).await;

        assert!(!app.submit_pending);
        assert!(app.form.is_some());
        assert_eq!(app.current_view, View::Form);
        assert_eq!(
            app.toasts.latest().unwrap().message,
            "Erreur lors de l'ajout des données"
        );
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_form_reports_the_row() {
        let svc = services(StubSheet::default(), StubNotifier::default());
        let mut app = test_app();
        app.open_form(date!(2024 - 04 - 03));

        run_action(Action::Submit, &mut app, &svc).await;

        assert_eq!(
            app.toasts.latest().unwrap().message,
            "Veuillez remplir tous les champs obligatoires à la ligne 1"
        );
        assert!(app.form.is_some());
    }

    #[tokio::test]
    async fn app_stays_usable_while_an_action_is_in_flight() {
        let svc = services(StubSheet::with(sample_dataset()), StubNotifier::default());
        let mut app = test_app();
        app.is_loading = true;

        let pending = perform(Action::LoadDataset, app.workbench.clone(), &svc);
        // The app is not borrowed by the request and can still be drawn.
        app.throbber_state.calc_next();
        assert!(app.workbench.dataset().rows.is_empty());

        let completed = pending.await;
        apply(&mut app, completed);
        assert_eq!(app.workbench.dataset().rows.len(), 2);
        assert!(!app.is_loading);
    }
}
