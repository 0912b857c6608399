use crate::api::{is_not_found, ApiClient};
use crate::app::{App, DeleteTarget, FormMode, PreviewState, PreviewView, Route};
use anyhow::Result;
use storypath::{PreviewSession, ProjectId};

use super::action_queue::{Action, ActionTx};
use super::views::enqueue_route_load;

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    client: &ApiClient,
    action_tx: &ActionTx,
) -> Result<()> {
    match action {
        Action::LoadRoute(route) => {
            load_route(route, app, client).await;
        }
        Action::SubmitProjectForm => {
            submit_project_form(app, client, action_tx).await;
        }
        Action::SubmitLocationForm => {
            submit_location_form(app, client, action_tx).await;
        }
        Action::ConfirmDelete => {
            handle_confirm_delete(app, client).await;
        }
    }
    Ok(())
}

/// Results that arrive after the user moved on are dropped.
fn still_on(app: &App, route: Route) -> bool {
    if app.route == route {
        return true;
    }
    tracing::debug!(%route, current = %app.route, "dropping result for stale route");
    false
}

async fn load_route(route: Route, app: &mut App, client: &ApiClient) {
    if !still_on(app, route) {
        return;
    }
    app.is_loading = true;

    match route {
        Route::Home | Route::ProjectAdd | Route::LocationAdd(_) => {}
        Route::Projects => match client.list_projects().await {
            Ok(projects) => {
                tracing::info!(count = projects.len(), "projects loaded");
                app.project_list.set_projects(projects);
            }
            Err(e) => {
                tracing::error!("Failed to load projects: {:#}", e);
                app.set_status(format!("Error loading projects: {}", e));
            }
        },
        Route::ProjectEdit(id) => match client.get_project(id).await {
            Ok(project) => {
                if let Some(form) = app.project_form.as_mut() {
                    form.load(&project);
                }
            }
            Err(e) => {
                tracing::error!(%id, "Failed to load project: {:#}", e);
                app.set_status(format!("Error loading project: {}", e));
            }
        },
        Route::Locations(project_id) => {
            match client.list_locations_by_project(project_id).await {
                Ok(locations) => {
                    tracing::info!(%project_id, count = locations.len(), "locations loaded");
                    if let Some(list) = app.location_list.as_mut() {
                        list.set_locations(locations);
                    }
                }
                Err(e) => {
                    tracing::error!(%project_id, "Failed to load locations: {:#}", e);
                    app.set_status(format!("Error loading locations: {}", e));
                }
            }
        }
        Route::LocationEdit(id) => match client.get_location(id).await {
            Ok(location) => {
                if let Some(form) = app.location_form.as_mut() {
                    form.load(&location);
                }
            }
            Err(e) => {
                tracing::error!(%id, "Failed to load location: {:#}", e);
                app.set_status(format!("Error loading location: {}", e));
            }
        },
        Route::Preview(project_id) => {
            let state = load_preview(project_id, app, client).await;
            app.preview = Some(state);
        }
    }

    app.is_loading = false;
}

async fn load_preview(project_id: ProjectId, app: &mut App, client: &ApiClient) -> PreviewState {
    let project = match client.get_project(project_id).await {
        Ok(project) => project,
        Err(e) => {
            if is_not_found(&e) {
                tracing::warn!(%project_id, "preview of missing project");
            } else {
                tracing::error!(%project_id, "Failed to load project: {:#}", e);
                app.set_status(format!("Error loading project: {}", e));
            }
            return PreviewState::Missing(project_id);
        }
    };

    let locations = match client.list_locations_by_project(project_id).await {
        Ok(locations) => locations,
        Err(e) => {
            tracing::error!(%project_id, "Failed to load locations: {:#}", e);
            app.set_status(format!("Error loading locations: {}", e));
            Vec::new()
        }
    };

    PreviewState::Ready(PreviewView::new(PreviewSession::new(project, locations)))
}

async fn submit_project_form(app: &mut App, client: &ApiClient, action_tx: &ActionTx) {
    let Some(form) = app.project_form.as_ref() else {
        return;
    };
    let route = app.route;
    let mode = form.mode;
    let parent = form.parent_route();
    let payload = form.to_payload(&app.username);

    app.is_loading = true;
    let result = match mode {
        FormMode::Create => client.create_project(&payload).await,
        FormMode::Edit(id) => client.update_project(id, &payload).await,
    };
    app.is_loading = false;

    match result {
        Ok(project) => {
            tracing::info!(id = %project.id, title = %project.title, "project saved");
            if !still_on(app, route) {
                return;
            }
            app.show_notice(match mode {
                FormMode::Create => "Project added successfully!",
                FormMode::Edit(_) => "Project updated successfully!",
            });
            app.navigate_to(parent);
            enqueue_route_load(app, action_tx);
        }
        Err(e) => {
            tracing::error!("Failed to save project: {:#}", e);
            app.set_status(format!("Error saving project: {}", e));
        }
    }
}

async fn submit_location_form(app: &mut App, client: &ApiClient, action_tx: &ActionTx) {
    let Some(form) = app.location_form.as_ref() else {
        return;
    };
    let route = app.route;
    let mode = form.mode;
    let parent = form.parent_route();
    let Some(payload) = form.to_payload(&app.username) else {
        app.set_status("Location is not attached to a project.".to_string());
        return;
    };

    app.is_loading = true;
    let result = match mode {
        FormMode::Create => client.create_location(&payload).await,
        FormMode::Edit(id) => client.update_location(id, &payload).await,
    };
    app.is_loading = false;

    match result {
        Ok(location) => {
            tracing::info!(id = %location.id, name = %location.location_name, "location saved");
            if !still_on(app, route) {
                return;
            }
            app.show_notice(match mode {
                FormMode::Create => "Location added successfully!",
                FormMode::Edit(_) => "Location updated successfully!",
            });
            app.navigate_to(parent);
            enqueue_route_load(app, action_tx);
        }
        Err(e) => {
            tracing::error!("Failed to save location: {:#}", e);
            app.set_status(format!("Error saving location: {}", e));
        }
    }
}

async fn handle_confirm_delete(app: &mut App, client: &ApiClient) {
    let Some(ctx) = app.delete_context.take() else {
        return;
    };

    match ctx.target {
        DeleteTarget::Project(id) => match client.delete_project(id).await {
            Ok(()) => {
                tracing::info!(%id, "project deleted");
                app.project_list.remove(id);
                app.set_status(format!("Deleted \"{}\"", ctx.display_label));
            }
            Err(e) => {
                tracing::error!(%id, "Failed to delete project: {:#}", e);
                app.set_status(format!("Delete failed: {}", e));
            }
        },
        DeleteTarget::Location(id) => match client.delete_location(id).await {
            Ok(()) => {
                tracing::info!(%id, "location deleted");
                if let Some(list) = app.location_list.as_mut() {
                    list.remove(id);
                }
                app.set_status(format!("Deleted \"{}\"", ctx.display_label));
            }
            Err(e) => {
                tracing::error!(%id, "Failed to delete location: {:#}", e);
                app.set_status(format!("Delete failed: {}", e));
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TextInput;
    use storypath::{LocationId, PreviewScreen};

    use super::super::action_queue::channel;

    fn dev_client() -> ApiClient {
        ApiClient::dev().unwrap()
    }

    async fn open(route: Route, app: &mut App, client: &ApiClient) {
        let (tx, _rx) = channel();
        app.navigate_to(route);
        run_action(Action::LoadRoute(route), app, client, &tx)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deleting_project_removes_one_row_with_one_call() {
        let client = dev_client();
        let mut app = App::new("dev");
        open(Route::Projects, &mut app, &client).await;
        let before = app.project_list.projects.len();

        app.request_project_delete();
        let (tx, _rx) = channel();
        run_action(Action::ConfirmDelete, &mut app, &client, &tx)
            .await
            .unwrap();

        assert_eq!(app.project_list.projects.len(), before - 1);
        assert_eq!(client.dev_backend().unwrap().delete_calls().len(), 1);
        assert!(app.delete_context.is_none());
    }

    #[tokio::test]
    async fn deleting_location_removes_row() {
        let client = dev_client();
        let mut app = App::new("dev");
        open(Route::Locations(ProjectId::new(1)), &mut app, &client).await;
        let before = app.location_list.as_ref().unwrap().locations.len();
        assert!(before > 0);

        app.request_location_delete();
        let (tx, _rx) = channel();
        run_action(Action::ConfirmDelete, &mut app, &client, &tx)
            .await
            .unwrap();

        assert_eq!(
            app.location_list.as_ref().unwrap().locations.len(),
            before - 1
        );
        assert_eq!(
            client.dev_backend().unwrap().delete_calls(),
            vec!["location:10".to_string()]
        );
    }

    #[tokio::test]
    async fn creating_project_returns_to_list() {
        let client = dev_client();
        let mut app = App::new("dev");
        app.navigate_to(Route::ProjectAdd);
        {
            let form = app.project_form.as_mut().unwrap();
            form.title = TextInput::from_str("Night Walk");
            form.description = TextInput::from_str("d");
            form.instructions = TextInput::from_str("i");
        }

        let (tx, mut rx) = channel();
        run_action(Action::SubmitProjectForm, &mut app, &client, &tx)
            .await
            .unwrap();

        assert_eq!(app.notice.as_deref(), Some("Project added successfully!"));
        assert_eq!(app.route, Route::Projects);
        assert_eq!(rx.try_recv().ok(), Some(Action::LoadRoute(Route::Projects)));

        let saved = client.list_projects().await.unwrap();
        let created = saved.iter().find(|p| p.title == "Night Walk").unwrap();
        assert_eq!(created.username.as_deref(), Some("dev"));
    }

    #[tokio::test]
    async fn updating_location_returns_to_its_project() {
        let client = dev_client();
        let mut app = App::new("dev");
        open(Route::LocationEdit(LocationId::new(11)), &mut app, &client).await;
        app.location_form
            .as_mut()
            .unwrap()
            .name = TextInput::from_str("Main Library");

        let (tx, _rx) = channel();
        run_action(Action::SubmitLocationForm, &mut app, &client, &tx)
            .await
            .unwrap();

        assert_eq!(app.notice.as_deref(), Some("Location updated successfully!"));
        assert_eq!(app.route, Route::Locations(ProjectId::new(1)));
        let updated = client.get_location(LocationId::new(11)).await.unwrap();
        assert_eq!(updated.location_name, "Main Library");
    }

    #[tokio::test]
    async fn edit_form_loads_without_becoming_dirty() {
        let client = dev_client();
        let mut app = App::new("dev");
        open(Route::ProjectEdit(ProjectId::new(1)), &mut app, &client).await;
        let form = app.project_form.as_ref().unwrap();
        assert!(form.loaded);
        assert!(!form.is_dirty());
        assert_eq!(form.title.value, "Campus Tour");
    }

    #[tokio::test]
    async fn preview_of_missing_project_reports_missing() {
        let client = dev_client();
        let mut app = App::new("dev");
        open(Route::Preview(ProjectId::new(404)), &mut app, &client).await;
        assert!(matches!(app.preview, Some(PreviewState::Missing(_))));
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn preview_starts_at_home_with_max_score() {
        let client = dev_client();
        let mut app = App::new("dev");
        open(Route::Preview(ProjectId::new(1)), &mut app, &client).await;
        let Some(PreviewState::Ready(view)) = &app.preview else {
            panic!("preview not ready");
        };
        assert_eq!(view.session.screen(), PreviewScreen::Home);
        assert_eq!(view.session.max_score(), 30);
        assert_eq!(view.session.score(), 0);
    }

    #[tokio::test]
    async fn stale_load_is_dropped() {
        let client = dev_client();
        let mut app = App::new("dev");
        app.navigate_to(Route::Home);
        let (tx, _rx) = channel();
        run_action(Action::LoadRoute(Route::Projects), &mut app, &client, &tx)
            .await
            .unwrap();
        assert!(!app.project_list.loaded);
        assert!(app.project_list.projects.is_empty());
    }
}
