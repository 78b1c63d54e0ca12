//! Board routes, mounted under `/board`
//!
//! Page routes render HTML or redirect; every failure goes through
//! [`BoardError`]. Delete is called from script and answers JSON.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::db::{BoardRepo, FileRepo};
use crate::http::error::{ApiError, BoardError, DELETE_OK_MESSAGE};
use crate::http::extractors::{parse_bno, JsonOrForm, ValidBno, ValidFilter, ValidPage};
use crate::models::{NewBoard, NewReply, ReplyForm};
use crate::session::{Member, OptionalMember, RequireMember};
use crate::state::AppState;
use crate::uploads::{process_upload, read_write_form, remove_stored};
use crate::views;
use crate::views::board::ListPage;

/// Author to credit for a write: the session's member when logged in.
///
/// Fails only when the server requires a login and there is none.
fn session_author(state: &AppState, member: Option<Member>) -> Result<Option<String>, BoardError> {
    match member {
        Some(member) => Ok(Some(member.uid)),
        None if state.config().require_login => Err(BoardError::Unauthenticated),
        None => Ok(None),
    }
}

/// GET /board/list/{cpg}
#[tracing::instrument(skip(state, page), fields(cpg = page.page))]
async fn list(
    State(state): State<AppState>,
    ValidPage(page): ValidPage,
) -> Result<Html<String>, BoardError> {
    let result = BoardRepo::new(state.pool()).select_board(page).await?;

    Ok(Html(views::board::list(&ListPage {
        posts: &result.items,
        pager: result.pager(),
        baseurl: "/board/list/",
    })))
}

/// GET /board/list/{ftype}/{fkey}/{cpg}
#[tracing::instrument(skip_all, fields(ftype = %filter.ftype, fkey = filter.fkey(), cpg = page.page))]
async fn find(
    State(state): State<AppState>,
    ValidFilter(filter): ValidFilter,
    ValidPage(page): ValidPage,
) -> Result<Html<String>, BoardError> {
    let result = BoardRepo::new(state.pool()).find_board(&filter, page).await?;
    let baseurl = filter.base_url();

    Ok(Html(views::board::list(&ListPage {
        posts: &result.items,
        pager: result.pager(),
        baseurl: &baseurl,
    })))
}

/// GET /board/write
async fn write_form(RequireMember(member): RequireMember) -> Html<String> {
    Html(views::board::write(&member.uid))
}

/// POST /board/write
#[tracing::instrument(skip_all)]
async fn write_submit(
    State(state): State<AppState>,
    OptionalMember(member): OptionalMember,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Redirect, BoardError> {
    let author = session_author(&state, member)?;
    let form = read_write_form(multipart?).await?;

    let userid = author.or(form.userid).unwrap_or_default();
    let board = NewBoard::new(
        form.title.as_deref().unwrap_or_default(),
        &userid,
        form.contents.as_deref().unwrap_or_default(),
    )?;

    let upload_dir = &state.config().upload_dir;
    let attachs = process_upload(upload_dir, &form.files).await?;

    match FileRepo::new(state.pool()).insert_board(&board, &attachs).await {
        Ok(bno) => {
            tracing::info!(bno, attachs = attachs.len(), userid = board.userid(), "post created");
            Ok(Redirect::to("/board/list/1"))
        }
        Err(e) => {
            let stored: Vec<String> = attachs.into_iter().map(|a| a.stored_name).collect();
            remove_stored(upload_dir, &stored).await;
            Err(e.into())
        }
    }
}

/// GET /board/view/{bno}
#[tracing::instrument(skip(state, bno), fields(bno = bno.0))]
async fn view(State(state): State<AppState>, bno: ValidBno) -> Result<Html<String>, BoardError> {
    let detail = BoardRepo::new(state.pool()).selectone_board(bno.0).await?;
    Ok(Html(views::board::view(&detail)))
}

/// GET /board/update
async fn update_form() -> Html<String> {
    Html(views::board::update())
}

/// POST /board/reply
#[tracing::instrument(skip_all, fields(bno = form.bno))]
async fn reply(
    State(state): State<AppState>,
    OptionalMember(member): OptionalMember,
    JsonOrForm(form): JsonOrForm<ReplyForm>,
) -> Result<Redirect, BoardError> {
    let author = session_author(&state, member)?;
    let reply = NewReply::from_form(&form, author.as_deref())?;

    let rno = BoardRepo::new(state.pool()).insert_reply(&reply).await?;
    tracing::info!(rno, "reply created");

    Ok(Redirect::to(&format!("/board/view/{}", reply.bno())))
}

/// POST /board/rreply
#[tracing::instrument(skip_all, fields(bno = form.bno, rpno = ?form.rpno))]
async fn rreply(
    State(state): State<AppState>,
    OptionalMember(member): OptionalMember,
    JsonOrForm(form): JsonOrForm<ReplyForm>,
) -> Result<Redirect, BoardError> {
    let author = session_author(&state, member)?;
    let reply = NewReply::from_form(&form, author.as_deref())?;
    reply.parent()?;

    let rno = BoardRepo::new(state.pool()).insert_rreply(&reply).await?;
    tracing::info!(rno, "nested reply created");

    Ok(Redirect::to(&format!("/board/view/{}", reply.bno())))
}

/// DELETE /board/view/{bno}
#[tracing::instrument(skip(state, member))]
async fn delete_board(
    State(state): State<AppState>,
    OptionalMember(member): OptionalMember,
    Path(bno): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if member.is_none() && state.config().require_login {
        return Err(ApiError::Unauthenticated);
    }
    let bno = parse_bno(&bno).map_err(|_| ApiError::NotFound)?;

    let outcome = BoardRepo::new(state.pool()).delete_board(bno).await?;
    if outcome.rows_affected == 0 {
        return Err(ApiError::NotFound);
    }

    remove_stored(&state.config().upload_dir, &outcome.stored_files).await;
    tracing::info!(bno, files = outcome.stored_files.len(), "post deleted");

    Ok(Json(json!({ "message": DELETE_OK_MESSAGE })))
}

/// Board routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list/{cpg}", get(list))
        .route("/list/{ftype}/{fkey}/{cpg}", get(find))
        .route("/write", get(write_form).post(write_submit))
        .route("/view/{bno}", get(view).delete(delete_board))
        .route("/update", get(update_form))
        .route("/reply", post(reply))
        .route("/rreply", post(rreply))
}
