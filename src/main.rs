use std::collections::HashMap;
use std::path::PathBuf;

use iced::keyboard::{self, key};
use iced::widget::image::Handle;
use iced::widget::scrollable::AbsoluteOffset;
use iced::widget::{button, column, container, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod remote;
mod state;
mod ui;

use api::{PixabayClient, SearchResponse};
use config::Settings;
use remote::LoadedImage;
use state::data::Thumbnail;
use state::lightbox::{FullImage, Lightbox};
use state::search::{Outcome, PageRequest, SearchSession, Status, Submit};
use ui::toast::{self, Toasts, TOAST_TIMEOUT};

/// How far the gallery scrolls when a further page arrives
const SCROLL_STEP: f32 = 420.0;

/// Main application state
struct ImageFinder {
    client: PixabayClient,
    /// Shared with the search client, used for image downloads
    http: reqwest::Client,
    thumbnail_size: u32,
    /// Text currently in the search field
    input: String,
    session: SearchSession,
    thumbnails: HashMap<u64, Thumbnail>,
    lightbox: Lightbox,
    toasts: Toasts,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    QueryChanged(String),
    /// Search button or Enter in the search field
    Submit,
    SearchFinished(PageRequest, Result<SearchResponse, String>),
    LoadMore,
    ThumbnailLoaded(u64, Result<Handle, String>),
    OpenImage(u64),
    /// Backdrop click, Close button or Escape
    CloseModal,
    FullImageLoaded(u64, Result<LoadedImage, String>),
    SaveImage,
    ImageSaved(Result<PathBuf, String>),
    DismissToast(u64),
}

impl ImageFinder {
    /// Create a new instance of the application
    fn new(settings: Settings, http: reqwest::Client) -> (Self, Task<Message>) {
        let client = PixabayClient::new(http.clone(), &settings);
        let mut app = ImageFinder {
            client,
            http,
            thumbnail_size: settings.thumbnail_size,
            input: String::new(),
            session: SearchSession::new(),
            thumbnails: HashMap::new(),
            lightbox: Lightbox::new(),
            toasts: Toasts::new(),
        };

        let mut tasks = vec![text_input::focus(ui::searchbar::input_id())];
        if !app.client.has_api_key() {
            tracing::warn!("🔑 No API key configured, searches will fail");
            tasks.push(app.notify(
                toast::Kind::Error,
                "No API key configured, set PIXABAY_API_KEY",
            ));
        }

        tracing::info!("🎨 Image Finder initialized with {:?}", app.client);
        (app, Task::batch(tasks))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(input) => {
                self.input = input;
                Task::none()
            }
            Message::Submit => match self.session.submit(&self.input) {
                Submit::Empty => self.notify(toast::Kind::Error, "Please enter a search query"),
                Submit::Unchanged => Task::none(),
                Submit::Fetch(request) => {
                    self.thumbnails.clear();
                    self.lightbox.close();
                    self.search(request)
                }
            },
            Message::LoadMore => match self.session.load_more() {
                Some(request) => self.search(request),
                None => Task::none(),
            },
            Message::SearchFinished(request, result) => {
                match self.session.apply(&request, result) {
                    Outcome::Stale => Task::none(),
                    Outcome::Appended(range) => {
                        let mut tasks = Vec::with_capacity(range.len() + 1);
                        for item in &self.session.items()[range] {
                            let id = item.id;
                            self.thumbnails.insert(id, Thumbnail::Loading);
                            tasks.push(Task::perform(
                                remote::fetch_thumbnail(
                                    self.http.clone(),
                                    item.thumbnail_url.clone(),
                                    self.thumbnail_size,
                                ),
                                move |result| Message::ThumbnailLoaded(id, result),
                            ));
                        }

                        if request.page > 1 {
                            tasks.push(scrollable::scroll_by(
                                gallery_scroll_id(),
                                AbsoluteOffset {
                                    x: 0.0,
                                    y: SCROLL_STEP,
                                },
                            ));
                        }
                        Task::batch(tasks)
                    }
                    Outcome::Rejected(message) => self.notify(toast::Kind::Error, message),
                }
            }
            Message::ThumbnailLoaded(id, result) => {
                // Tiles from a previous query are gone by now
                if self.session.find(id).is_some() {
                    let thumbnail = match result {
                        Ok(handle) => Thumbnail::Ready(handle),
                        Err(e) => {
                            tracing::warn!("⚠️  Thumbnail {} failed: {}", id, e);
                            Thumbnail::Failed
                        }
                    };
                    self.thumbnails.insert(id, thumbnail);
                }
                Task::none()
            }
            Message::OpenImage(id) => {
                let Some(item) = self.session.find(id) else {
                    return Task::none();
                };
                let url = item.image_url.clone();
                self.lightbox.open(id);
                Task::perform(remote::fetch_full_image(self.http.clone(), url), move |result| {
                    Message::FullImageLoaded(id, result)
                })
            }
            Message::CloseModal => {
                self.lightbox.close();
                Task::none()
            }
            Message::FullImageLoaded(id, result) => {
                if let Err(e) = &result {
                    tracing::warn!("⚠️  Full image {} failed: {}", id, e);
                }
                self.lightbox.finish(id, result);
                Task::none()
            }
            Message::SaveImage => {
                let (Some(id), Some(FullImage::Ready(loaded))) =
                    (self.lightbox.selected(), self.lightbox.image())
                else {
                    return Task::none();
                };
                let file_name = self
                    .session
                    .find(id)
                    .map(|item| remote::suggested_file_name(&item.image_url, id))
                    .unwrap_or_else(|| format!("{}.jpg", id));

                // Show the native save dialog
                let Some(path) = FileDialog::new()
                    .set_title("Save Image")
                    .set_file_name(file_name)
                    .save_file()
                else {
                    return Task::none();
                };
                Task::perform(
                    remote::save_image(path, loaded.bytes.clone()),
                    Message::ImageSaved,
                )
            }
            Message::ImageSaved(Ok(path)) => {
                self.notify(toast::Kind::Info, format!("Saved to {}", path.display()))
            }
            Message::ImageSaved(Err(e)) => {
                tracing::error!("❌ Save failed: {}", e);
                self.notify(toast::Kind::Error, format!("Could not save image: {}", e))
            }
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let items = self.session.items();
        let mut body = column![]
            .spacing(20)
            .padding(20)
            .width(Length::Fill)
            .align_x(Alignment::Center);

        if !items.is_empty() {
            body = body
                .push(
                    text(format!(
                        "\"{}\": showing {} of {} (page {})",
                        self.session.query(),
                        items.len(),
                        self.session.total(),
                        self.session.page()
                    ))
                    .size(14),
                )
                .push(ui::gallery::view(
                    items,
                    &self.thumbnails,
                    self.thumbnail_size as f32,
                ));
        }

        if self.session.can_load_more() {
            body = body.push(
                button(text("Load more").size(16))
                    .on_press(Message::LoadMore)
                    .padding([10, 24]),
            );
        }

        if self.session.is_pending() {
            body = body.push(text("Loading…").size(18));
        }
        match self.session.status() {
            Status::Idle => {
                body = body.push(text("Type a query and press Enter to search").size(16));
            }
            Status::Rejected(message) => {
                body = body.push(text(format!("There are no images to show: {}", message)).size(16));
            }
            Status::Pending | Status::Resolved => {}
        }

        let page: Element<Message> = column![
            ui::searchbar::view(&self.input),
            scrollable(container(body).width(Length::Fill))
                .id(gallery_scroll_id())
                .height(Length::Fill),
        ]
        .into();

        let page = match (self.lightbox.selected(), self.lightbox.image()) {
            (Some(id), Some(image)) => match self.session.find(id) {
                Some(item) => ui::modal::view(page, ui::modal::lightbox(item, image)),
                None => page,
            },
            _ => page,
        };

        toast::overlay(page, &self.toasts)
    }

    /// Escape closes the lightbox
    fn subscription(&self) -> Subscription<Message> {
        if self.lightbox.is_open() {
            keyboard::on_key_press(|key, _modifiers| match key {
                keyboard::Key::Named(key::Named::Escape) => Some(Message::CloseModal),
                _ => None,
            })
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Launch a search request in the background
    fn search(&self, request: PageRequest) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(
            async move {
                let result = client
                    .search(&request.query, request.page)
                    .await
                    .map_err(|e| e.to_string());
                (request, result)
            },
            |(request, result)| Message::SearchFinished(request, result),
        )
    }

    /// Show a toast and schedule its removal
    fn notify(&mut self, kind: toast::Kind, text: impl Into<String>) -> Task<Message> {
        let id = self.toasts.push(kind, text);
        Task::perform(tokio::time::sleep(TOAST_TIMEOUT), move |_| {
            Message::DismissToast(id)
        })
    }
}

fn gallery_scroll_id() -> scrollable::Id {
    scrollable::Id::new("gallery")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("image_finder=info")),
        )
        .init();

    let settings = Settings::load()?;
    let http = api::build_http_client(&settings)?;

    iced::application("Image Finder", ImageFinder::update, ImageFinder::view)
        .subscription(ImageFinder::subscription)
        .theme(ImageFinder::theme)
        .centered()
        .run_with(move || ImageFinder::new(settings, http))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Hit;
    use std::ops::Range;

    // Toasts schedule their removal with a tokio timer
    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
    }

    fn app() -> ImageFinder {
        let settings = Settings {
            api_key: Some("test-key".into()),
            ..Settings::default()
        };
        let http = api::build_http_client(&settings).unwrap();
        let (app, _task) = ImageFinder::new(settings, http);
        app
    }

    fn search_for(app: &mut ImageFinder, query: &str) {
        let _ = app.update(Message::QueryChanged(query.to_string()));
        let _ = app.update(Message::Submit);
    }

    fn request(seq: u64, query: &str, page: u32) -> PageRequest {
        PageRequest {
            seq,
            query: query.to_string(),
            page,
        }
    }

    fn hits(ids: Range<u64>, total_hits: u64) -> SearchResponse {
        SearchResponse {
            total_hits,
            hits: ids
                .map(|id| Hit {
                    id,
                    webformat_url: format!("https://cdn/{id}_640.jpg"),
                    large_image_url: format!("https://cdn/{id}_1280.jpg"),
                    tags: format!("tag{id}"),
                })
                .collect(),
        }
    }

    fn toast_texts(app: &ImageFinder) -> Vec<String> {
        app.toasts.iter().map(|toast| toast.text.clone()).collect()
    }

    fn pixel() -> Handle {
        Handle::from_rgba(1, 1, vec![0u8; 4])
    }

    #[test]
    fn test_blank_submit_raises_toast() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = app();

        search_for(&mut app, "   ");

        assert_eq!(toast_texts(&app), vec!["Please enter a search query"]);
        assert_eq!(app.session.status(), &Status::Idle);
    }

    #[test]
    fn test_failed_search_rejects_and_raises_toast() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = app();

        search_for(&mut app, "");
        search_for(&mut app, "Cats");
        assert_eq!(app.session.status(), &Status::Pending);

        let _ = app.update(Message::SearchFinished(
            request(1, "cats", 1),
            Err("boom".to_string()),
        ));

        assert_eq!(app.session.status(), &Status::Rejected("boom".to_string()));
        assert_eq!(
            toast_texts(&app),
            vec!["Please enter a search query", "boom"]
        );
    }

    #[test]
    fn test_empty_page_raises_toast() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = app();

        search_for(&mut app, "qwertyuiop");
        let _ = app.update(Message::SearchFinished(request(1, "qwertyuiop", 1), Ok(hits(0..0, 0))));

        assert!(matches!(app.session.status(), Status::Rejected(_)));
        assert_eq!(toast_texts(&app).len(), 1);
    }

    #[test]
    fn test_new_query_clears_thumbnails_and_lightbox() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = app();

        search_for(&mut app, "cats");
        let _ = app.update(Message::SearchFinished(request(1, "cats", 1), Ok(hits(1..4, 10))));
        assert_eq!(app.thumbnails.len(), 3);
        assert!(app.thumbnails.values().all(|t| matches!(t, Thumbnail::Loading)));

        let _ = app.update(Message::OpenImage(2));
        assert_eq!(app.lightbox.selected(), Some(2));

        search_for(&mut app, "dogs");
        assert!(app.thumbnails.is_empty());
        assert!(!app.lightbox.is_open());
        assert!(app.session.items().is_empty());
        assert_eq!(app.session.status(), &Status::Pending);
    }

    #[test]
    fn test_late_thumbnail_from_previous_query_dropped() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = app();

        search_for(&mut app, "cats");
        let _ = app.update(Message::SearchFinished(request(1, "cats", 1), Ok(hits(1..4, 10))));
        search_for(&mut app, "dogs");

        let _ = app.update(Message::ThumbnailLoaded(1, Ok(pixel())));
        assert!(app.thumbnails.is_empty());

        let _ = app.update(Message::SearchFinished(request(2, "dogs", 1), Ok(hits(7..9, 2))));
        let _ = app.update(Message::ThumbnailLoaded(7, Ok(pixel())));
        let _ = app.update(Message::ThumbnailLoaded(8, Err("404".to_string())));

        assert!(matches!(app.thumbnails.get(&7), Some(Thumbnail::Ready(_))));
        assert!(matches!(app.thumbnails.get(&8), Some(Thumbnail::Failed)));
    }

    #[test]
    fn test_load_more_appends_through_update() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = app();

        search_for(&mut app, "cats");
        let _ = app.update(Message::SearchFinished(request(1, "cats", 1), Ok(hits(1..4, 6))));
        let _ = app.update(Message::LoadMore);
        assert_eq!(app.session.page(), 2);

        let _ = app.update(Message::SearchFinished(request(2, "cats", 2), Ok(hits(4..7, 6))));
        assert_eq!(app.session.items().len(), 6);
        assert_eq!(app.thumbnails.len(), 6);
        assert!(!app.session.can_load_more());
    }

    #[test]
    fn test_close_modal() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = app();

        search_for(&mut app, "cats");
        let _ = app.update(Message::SearchFinished(request(1, "cats", 1), Ok(hits(1..4, 10))));

        // Unknown ids do not open anything
        let _ = app.update(Message::OpenImage(99));
        assert!(!app.lightbox.is_open());

        let _ = app.update(Message::OpenImage(3));
        assert!(app.lightbox.is_open());
        let _ = app.update(Message::CloseModal);
        assert!(!app.lightbox.is_open());
    }

    #[test]
    fn test_dismiss_toast() {
        let runtime = runtime();
        let _guard = runtime.enter();
        let mut app = app();

        search_for(&mut app, "");
        let id = app.toasts.iter().next().map(|toast| toast.id).unwrap();
        let _ = app.update(Message::DismissToast(id));
        assert!(app.toasts.is_empty());
    }
}
