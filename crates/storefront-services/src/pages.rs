use crate::error::ServiceResult;
use crate::storefront::Storefront;

impl Storefront {
    /// Records a view of the home page and returns its content.
    pub async fn render_page(&self) -> ServiceResult<String> {
        self.analytics
            .track_page_view(&self.config.store.home_path)
            .await?;
        Ok(self.config.store.home_content.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::collaborators::{CollaboratorError, MockPageViewTracker};
    use crate::config::StorefrontConfig;
    use crate::storefront::Storefront;
    use std::sync::Arc;

    fn storefront_with_tracker(tracker: MockPageViewTracker) -> Storefront {
        Storefront::builder(StorefrontConfig::default())
            .with_analytics(Arc::new(tracker))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_render_page_tracks_home() {
        let mut tracker = MockPageViewTracker::new();
        tracker
            .expect_track_page_view()
            .withf(|path| path == "/home")
            .times(1)
            .returning(|_| Ok(()));
        let storefront = storefront_with_tracker(tracker);

        let page = storefront.render_page().await.unwrap();

        assert_eq!(page, "<div>content</div>");
    }

    #[tokio::test]
    async fn test_render_page_fails_when_tracking_fails() {
        let mut tracker = MockPageViewTracker::new();
        tracker
            .expect_track_page_view()
            .times(1)
            .returning(|_| Err(CollaboratorError::new("analytics", "quota exceeded")));
        let storefront = storefront_with_tracker(tracker);

        assert!(storefront.render_page().await.is_err());
    }
}
