use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::modules::queue::handler::submit,
        crate::modules::queue::handler::status,
        crate::modules::queue::handler::download,
        crate::modules::queue::handler::stats,
        crate::modules::text::handler::create_session,
        crate::modules::text::handler::translate,
        crate::modules::text::handler::history,
        crate::modules::text::handler::clear_history,
    ),
    components(
        schemas(
            crate::modules::queue::dto::SubmitResponse,
            crate::modules::queue::dto::RejectedFile,
            crate::modules::queue::dto::JobFileDto,
            crate::modules::queue::dto::FileOutputDto,
            crate::modules::queue::dto::JobStatusResponse,
            crate::modules::queue::model::JobStatus,
            crate::modules::queue::store::QueueStats,
            crate::modules::text::dto::TranslateTextRequest,
            crate::modules::text::dto::TranslateTextResponse,
            crate::modules::text::dto::SessionResponse,
            crate::modules::text::dto::HistoryEntry,
            crate::modules::text::dto::HistoryResponse,
        )
    ),
    tags(
        (name = "Queue", description = "Document translation queue"),
        (name = "Text", description = "Session-scoped text translation"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;
