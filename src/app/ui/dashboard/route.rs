use anyhow::Context;
use askama::Template;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
    Form,
};
use tower_sessions::Session;

use super::{
    schema::ComposerForm,
    state::ComposerState,
    store::{fetch_analytics, Analytics},
    view::{ContactRow, FilterView, HistoryRow},
    ANALYTICS, COMPOSER, CONTACTS, HISTORY,
};
use crate::{
    app::{
        api::{contact::store::fetch_contacts, newsletter::store::fetch_newsletter_summaries},
        error::AppResult,
        extractor::DashboardUser,
        ui::{
            flash::Flash,
            nav::{nav, NavItem},
        },
        AppState,
    },
    domain::{
        contact::{filter::unique_countries, Contact, Selection},
        newsletter::{dispatch, Draft},
    },
};

#[derive(Template)]
#[template(path = "dashboard/composer.html")]
struct ComposerTemplate {
    nav: Vec<NavItem>,
    flash: Option<Flash>,
    draft: Draft,
    filter: FilterView,
    return_to: &'static str,
    rows: Vec<ContactRow>,
    selected_count: usize,
    filtered_count: usize,
    all_selected: bool,
}

#[derive(Template)]
#[template(path = "dashboard/contacts.html")]
struct ContactsTemplate {
    nav: Vec<NavItem>,
    flash: Option<Flash>,
    filter: FilterView,
    return_to: &'static str,
    rows: Vec<ContactRow>,
    filtered_count: usize,
}

#[derive(Template)]
#[template(path = "dashboard/history.html")]
struct HistoryTemplate {
    nav: Vec<NavItem>,
    flash: Option<Flash>,
    newsletters: Vec<HistoryRow>,
}

#[derive(Template)]
#[template(path = "dashboard/analytics.html")]
struct AnalyticsTemplate {
    nav: Vec<NavItem>,
    flash: Option<Flash>,
    stats: Analytics,
}

/// Contacts for a page. A failing query renders an empty table.
async fn load_contacts(state: &AppState) -> Vec<Contact> {
    fetch_contacts(&state.db).await.unwrap_or_else(|e| {
        tracing::error!(details = ?e, "rendering the dashboard without contacts");
        Vec::new()
    })
}

#[tracing::instrument(name = "Composer page", skip(session, state))]
pub async fn composer_page(
    user: DashboardUser,
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let composer = ComposerState::load(&session).await?;
    let flash = Flash::take(&session).await?;
    let contacts = load_contacts(&state).await;

    let filtered = composer.filter.apply(&contacts);
    let rows: Vec<ContactRow> = filtered
        .iter()
        .map(|contact| ContactRow::new(contact, &composer.selection))
        .collect();

    Ok(ComposerTemplate {
        nav: nav(COMPOSER),
        flash,
        filter: FilterView::new(&composer.filter, unique_countries(&contacts)),
        return_to: COMPOSER,
        selected_count: composer.selection.len(),
        filtered_count: rows.len(),
        all_selected: composer.selection.all_selected(rows.len()),
        rows,
        draft: composer.draft,
    })
}

#[tracing::instrument(name = "Contacts page", skip(session, state))]
pub async fn contacts_page(
    user: DashboardUser,
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let composer = ComposerState::load(&session).await?;
    let flash = Flash::take(&session).await?;
    let contacts = load_contacts(&state).await;

    // Read-only table: nothing is shown as selected here.
    let no_selection = Selection::default();
    let rows: Vec<ContactRow> = composer
        .filter
        .apply(&contacts)
        .iter()
        .map(|contact| ContactRow::new(contact, &no_selection))
        .collect();

    Ok(ContactsTemplate {
        nav: nav(CONTACTS),
        flash,
        filter: FilterView::new(&composer.filter, unique_countries(&contacts)),
        return_to: CONTACTS,
        filtered_count: rows.len(),
        rows,
    })
}

#[tracing::instrument(name = "Apply contact filter", skip(session, form))]
pub async fn apply_filter(
    user: DashboardUser,
    session: Session,
    Form(form): Form<ComposerForm>,
) -> AppResult<Redirect> {
    let return_path = form.return_path();
    let mut composer = ComposerState::load(&session).await?;
    composer.absorb(form);
    composer.save(&session).await?;

    Ok(Redirect::to(return_path))
}

#[tracing::instrument(name = "Toggle contact", skip(session, form))]
pub async fn toggle_contact(
    user: DashboardUser,
    session: Session,
    Path(contact_id): Path<i64>,
    Form(form): Form<ComposerForm>,
) -> AppResult<Redirect> {
    let mut composer = ComposerState::load(&session).await?;
    composer.absorb(form);
    composer.selection.toggle(contact_id);
    composer.save(&session).await?;

    Ok(Redirect::to(COMPOSER))
}

#[tracing::instrument(name = "Toggle all contacts", skip(session, state, form))]
pub async fn toggle_all(
    user: DashboardUser,
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<ComposerForm>,
) -> AppResult<Redirect> {
    let mut composer = ComposerState::load(&session).await?;
    composer.absorb(form);

    let contacts = fetch_contacts(&state.db)
        .await
        .context("Failed to retrieve contacts.")?;
    let filtered_ids: Vec<i64> = composer
        .filter
        .apply(&contacts)
        .iter()
        .map(|contact| contact.id)
        .collect();
    composer.selection.toggle_all(&filtered_ids);
    composer.save(&session).await?;

    Ok(Redirect::to(COMPOSER))
}

#[tracing::instrument(name = "Send newsletter from composer", skip(session, state, form))]
pub async fn send(
    user: DashboardUser,
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<ComposerForm>,
) -> AppResult<Redirect> {
    let mut composer = ComposerState::load(&session).await?;
    composer.absorb(form);

    let request = match composer.draft.to_request(&composer.selection) {
        Ok(request) => request,
        Err(e) => {
            composer.save(&session).await?;
            Flash::error(e.title(), e.to_string()).push(&session).await?;
            return Ok(Redirect::to(COMPOSER));
        }
    };

    match dispatch(&state.db, Some(user.caller()), request).await {
        Ok(receipt) => {
            composer.draft = Draft::default();
            composer.selection.clear();
            composer.save(&session).await?;
            Flash::success(
                "Newsletter sent!",
                format!(
                    "Successfully sent to {} recipients",
                    receipt.recipient_count
                ),
            )
            .push(&session)
            .await?;

            Ok(Redirect::to(HISTORY))
        }
        Err(e) => {
            tracing::error!(details = ?e, "failed to send newsletter");
            composer.save(&session).await?;
            Flash::error("Failed to send", e.to_string())
                .push(&session)
                .await?;

            Ok(Redirect::to(COMPOSER))
        }
    }
}

#[tracing::instrument(name = "History page", skip(session, state))]
pub async fn history_page(
    user: DashboardUser,
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let flash = Flash::take(&session).await?;
    let newsletters = fetch_newsletter_summaries(&state.db, user.user_id)
        .await
        .context("Failed to retrieve newsletters.")?;

    Ok(HistoryTemplate {
        nav: nav(HISTORY),
        flash,
        newsletters: newsletters.into_iter().map(Into::into).collect(),
    })
}

#[tracing::instrument(name = "Analytics page", skip(session, state))]
pub async fn analytics_page(
    user: DashboardUser,
    session: Session,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let flash = Flash::take(&session).await?;
    let stats = fetch_analytics(&state.db, user.user_id)
        .await
        .context("Failed to compute analytics.")?;

    Ok(AnalyticsTemplate {
        nav: nav(ANALYTICS),
        flash,
        stats,
    })
}
