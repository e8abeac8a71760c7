//! Server harness and shared world for HTTP behaviour tests.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. The `WorldFixture` ensures the server
//! is stopped even if a test panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{App, HttpServer, web};
use awc::Client;
use chrono::TimeDelta;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use wedding_backend::Trace;
use wedding_backend::domain::{
    AdminCredential, AdminQueryService, GalleryService, MediaDeletionService,
    RandomAccessCodeGenerator, RecentDeletions, RsvpService, TRACE_ID_HEADER,
};
use wedding_backend::inbound::http::configure_api;
use wedding_backend::inbound::http::session_config::SessionSettings;
use wedding_backend::inbound::http::state::{AdminAccess, HttpState, HttpStatePorts};
use wedding_backend::outbound::cache::InMemoryGalleryCache;
use wedding_backend::outbound::memory::InMemoryRsvpRepository;

use crate::doubles::{NotifierResponse, RecordingMediaHost, RecordingNotifier};

pub(crate) const ADMIN_PASSWORD: &str = "confetti-and-cake";
pub(crate) const ORGANIZER_EMAIL: &str = "organizers@example.com";
pub(crate) const GALLERY_IMAGES: [&str; 3] = ["wedding/first-dance", "wedding/cake", "wedding/toast"];

pub(crate) struct WeddingWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) media: RecordingMediaHost,
    pub(crate) notifier: RecordingNotifier,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) last_set_cookie: Option<String>,
    pub(crate) session_cookie: Option<String>,
    pub(crate) access_code: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<WeddingWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(self.world.clone());
    }
}

pub(crate) fn shutdown(world: SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so we lock the world
    // while calling `block_on`. The future must not try to lock the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

pub(crate) fn with_world_async<R, F>(world: &SharedWorld, operation: impl FnOnce(String) -> F) -> R
where
    F: std::future::Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.base_url.clone();
    ctx.local.block_on(&ctx.runtime, operation(base_url))
}

/// A JSON request issued against the running server.
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
    pub(crate) include_cookie: bool,
}

/// Send the request and record status, trace id, body and any `Set-Cookie`.
pub(crate) fn perform_json_request(world: &SharedWorld, spec: RequestSpec<'_>) {
    let RequestSpec {
        method,
        path,
        payload,
        include_cookie,
    } = spec;
    let cookie = if include_cookie {
        world
            .borrow()
            .session_cookie
            .as_deref()
            .and_then(|raw| raw.split(';').next())
            .map(str::to_owned)
    } else {
        None
    };
    let (status, trace_id, set_cookie, body) = with_world_async(world, |base_url| async move {
        let mut request = Client::default().request(method, format!("{base_url}{path}"));
        if let Some(cookie) = cookie {
            request = request.insert_header((header::COOKIE, cookie));
        }
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect(path),
            None => request.send().await.expect(path),
        };
        let header_value = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let status = response.status().as_u16();
        let trace_id = header_value(TRACE_ID_HEADER);
        let set_cookie = header_value(header::SET_COOKIE.as_str());
        let body = response.body().await.expect(path);
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("JSON response body")
        };
        (status, trace_id, set_cookie, json)
    });

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_set_cookie = set_cookie;
    ctx.last_body = Some(body);
}

fn build_state(media: &RecordingMediaHost, notifier: &RecordingNotifier) -> HttpState {
    let repository = Arc::new(InMemoryRsvpRepository::default());
    let recent = Arc::new(RecentDeletions::new(Arc::new(DefaultClock)));
    let host = Arc::new(media.clone());
    let ports = HttpStatePorts {
        rsvp: Arc::new(RsvpService::new(
            Arc::clone(&repository),
            Arc::new(notifier.clone()),
            Arc::new(RandomAccessCodeGenerator),
            vec![ORGANIZER_EMAIL.to_owned()],
        )),
        admin: Arc::new(AdminQueryService::new(repository)),
        media_deletion: Arc::new(MediaDeletionService::new(
            Arc::clone(&host),
            Arc::clone(&recent),
        )),
        gallery: Arc::new(GalleryService::new(
            host,
            Arc::new(InMemoryGalleryCache::default()),
            recent,
        )),
    };
    let credential =
        AdminCredential::from_password(ADMIN_PASSWORD.to_owned()).expect("admin credential");
    HttpState::new(ports, AdminAccess::new(Some(credential)))
}

async fn spawn_wedding_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let session = SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    };
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(http_state);

    let server = HttpServer::new(move || {
        let api = web::scope("/api")
            .wrap(session.middleware(TimeDelta::hours(2)))
            .configure(configure_api);

        App::new()
            .app_data(http_data.clone())
            .wrap(Trace)
            .service(api)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn create_runtime_and_local() -> (Runtime, LocalSet) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    (runtime, local)
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let (runtime, local) = create_runtime_and_local();
    let media = RecordingMediaHost::with_images(&GALLERY_IMAGES);
    let notifier = RecordingNotifier::new(NotifierResponse::Ok(()));
    let http_state = build_state(&media, &notifier);

    let (base_url, server) = local
        .block_on(&runtime, async { spawn_wedding_server(http_state).await })
        .expect("server should start");

    let world = Rc::new(RefCell::new(WeddingWorld {
        runtime,
        local,
        base_url,
        server,
        media,
        notifier,
        last_status: None,
        last_body: None,
        last_trace_id: None,
        last_set_cookie: None,
        session_cookie: None,
        access_code: None,
    }));

    WorldFixture { world }
}
