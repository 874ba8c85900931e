use std::sync::Arc;

use crate::application::AdminPage;
use crate::domain::ports::KeyValueStore;
use crate::domain::product::ProductDraft;
use crate::errors::ClientError;
use crate::{render, Backends};

use super::cli::AdminAction;
use super::{failure, Response};

pub async fn run<S: KeyValueStore>(
    backends: &Backends,
    store: Arc<S>,
    action: AdminAction,
) -> Result<Response, ClientError> {
    let mut page = AdminPage::new(backends.catalog.clone(), backends.admin.clone(), store);

    let outcome = match action {
        AdminAction::List(args) => {
            page.fetch_products(args.page, args.filters()).await;
            return Ok(listing(&page));
        }
        AdminAction::Create(draft) => page
            .create_product(&ProductDraft::from(draft))
            .await
            .map_err(failure("Failed to add product"))?
            .map(|_| ()),
        AdminAction::Update { id, draft } => page
            .update_product(&id, &ProductDraft::from(draft))
            .await
            .map_err(failure("Failed to update product"))?
            .map(|_| ()),
        AdminAction::Delete { id } => page
            .delete_product(&id)
            .await
            .map_err(failure("Failed to delete product"))?,
    };

    Ok(Response::from_outcome(outcome, |()| listing(&page)))
}

fn listing<S: KeyValueStore>(page: &AdminPage<S>) -> Response {
    let text = format!(
        "{}{}",
        render::admin_products(&page.state),
        render::pagination(page.pagination())
    );
    if page.state.error.is_some() {
        Response::failed(text)
    } else {
        Response::ok(text)
    }
}
