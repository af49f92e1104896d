use actix_web::{
    cookie::{Cookie, SameSite},
    get,
    http::{header, StatusCode},
    post, web, HttpRequest, HttpResponse, ResponseError,
};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::models::MessageForm;
use crate::api::page::{ChatView, PageRenderer};
use crate::api::session::SessionStore;
use crate::chat::{quick_reply, ConversationLog, Dispatcher, Outcome, Utterance};

pub const SESSION_COOKIE: &str = "salon_session";

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Unknown quick reply: {0}")]
    UnknownQuickReply(String),
    #[error("Failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebError::UnknownQuickReply(_) => StatusCode::NOT_FOUND,
            WebError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn session_id(req: &HttpRequest) -> Option<Uuid> {
    req.cookie(SESSION_COOKIE).and_then(|c| c.value().parse().ok())
}

fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

fn render_page(
    renderer: &PageRenderer,
    id: Option<Uuid>,
    log: &ConversationLog,
    outcome: Option<&Outcome>,
) -> Result<HttpResponse, WebError> {
    let view = ChatView {
        diagnostic: outcome.and_then(|o| o.diagnostic.as_deref()),
        scroll_to_input: outcome.is_some(),
        ..ChatView::new(log.entries())
    };
    let html = renderer.render(&view)?;

    let mut response = HttpResponse::Ok();
    response.content_type("text/html; charset=utf-8");
    if let Some(id) = id {
        response.cookie(session_cookie(id));
    }
    Ok(response.body(html))
}

/// Renders the caller's current log, or an empty page when there is no live
/// session. Never starts a session.
async fn render_current(
    req: &HttpRequest,
    sessions: &SessionStore,
    renderer: &PageRenderer,
) -> Result<HttpResponse, WebError> {
    match sessions.get(session_id(req)) {
        Some((id, log)) => {
            let log = log.lock().await;
            render_page(renderer, Some(id), &log, None)
        }
        None => render_page(renderer, None, &ConversationLog::new(), None),
    }
}

#[get("/")]
pub async fn index(
    req: HttpRequest,
    sessions: web::Data<SessionStore>,
    renderer: web::Data<PageRenderer>,
) -> Result<HttpResponse, WebError> {
    render_current(&req, &sessions, &renderer).await
}

#[post("/quick-reply/{id}")]
pub async fn press_quick_reply(
    req: HttpRequest,
    reply_id: web::Path<String>,
    sessions: web::Data<SessionStore>,
    dispatcher: web::Data<Dispatcher>,
    renderer: web::Data<PageRenderer>,
) -> Result<HttpResponse, WebError> {
    let reply_id = reply_id.into_inner();
    let reply = quick_reply::find(&reply_id).ok_or(WebError::UnknownQuickReply(reply_id))?;

    let (id, log) = sessions.open(session_id(&req));
    let mut log = log.lock().await;
    let outcome = dispatcher.dispatch(&mut log, Utterance::QuickReply(reply)).await;
    render_page(&renderer, Some(id), &log, outcome.as_ref())
}

#[post("/message")]
pub async fn send_message(
    req: HttpRequest,
    form: web::Form<MessageForm>,
    sessions: web::Data<SessionStore>,
    dispatcher: web::Data<Dispatcher>,
    renderer: web::Data<PageRenderer>,
) -> Result<HttpResponse, WebError> {
    let prompt = form.into_inner().prompt;
    if prompt.trim().is_empty() {
        return render_current(&req, &sessions, &renderer).await;
    }

    let (id, log) = sessions.open(session_id(&req));
    let mut log = log.lock().await;

    let outcome = dispatcher.dispatch(&mut log, Utterance::FreeText(prompt)).await;

    if let Some(outcome) = &outcome {
        info!("Session {} answered via {:?}", id, outcome.resolution);
        if let Some(diagnostic) = &outcome.diagnostic {
            warn!("Session {} fell back: {}", id, diagnostic);
        }
    }

    render_page(&renderer, Some(id), &log, outcome.as_ref())
}

#[post("/reset")]
pub async fn reset(req: HttpRequest, sessions: web::Data<SessionStore>) -> HttpResponse {
    if let Some(id) = session_id(&req) {
        sessions.end(id);
    }

    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(removal)
        .finish()
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "healthy"}))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(press_quick_reply)
        .service(send_message)
        .service(reset)
        .service(health);
}
