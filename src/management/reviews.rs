use std::collections::HashSet;
use std::rc::Rc;

use leptos::logging::error;
use leptos::*;

use super::{Confirm, DELETE_NETWORK_FAILURE};
use crate::api::query::non_empty;
use crate::api::{ApiClient, ReviewQuery, Transport};
use crate::config::AppConfig;
use crate::models::Review;
use crate::notify::Notifier;

/// Raw text of the filter inputs; parsed only when a query is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewFilters {
    pub teacher: String,
    pub course: String,
    pub min_rating: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewFilterField {
    Teacher,
    Course,
    MinRating,
}

impl ReviewFilters {
    pub fn set(&mut self, field: ReviewFilterField, value: String) {
        match field {
            ReviewFilterField::Teacher => self.teacher = value,
            ReviewFilterField::Course => self.course = value,
            ReviewFilterField::MinRating => self.min_rating = value,
        }
    }

    /// Newest first. Unparseable numbers are treated as "no filter".
    pub fn to_query(&self, page_size: u32) -> ReviewQuery {
        ReviewQuery {
            page_size: Some(page_size),
            teacher: self.teacher.trim().parse().ok(),
            course: non_empty(&self.course),
            min_rating: self.min_rating.trim().parse().ok(),
            ordering: Some("-created_at".to_string()),
            ..ReviewQuery::default()
        }
    }
}

pub struct ReviewManager<T> {
    api: ApiClient<T>,
    notifier: Notifier,
    confirm: Rc<dyn Confirm>,
    page_size: u32,
    reviews: RwSignal<Vec<Review>>,
    loading: RwSignal<bool>,
    filters: RwSignal<ReviewFilters>,
    selected: RwSignal<Option<Review>>,
    on_deleted: Option<Callback<()>>,
}

impl<T> Clone for ReviewManager<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            notifier: self.notifier,
            confirm: Rc::clone(&self.confirm),
            page_size: self.page_size,
            reviews: self.reviews,
            loading: self.loading,
            filters: self.filters,
            selected: self.selected,
            on_deleted: self.on_deleted.clone(),
        }
    }
}

impl<T: Transport> ReviewManager<T> {
    pub fn new(
        api: ApiClient<T>,
        notifier: Notifier,
        confirm: Rc<dyn Confirm>,
        config: &AppConfig,
    ) -> Self {
        Self {
            api,
            notifier,
            confirm,
            page_size: config.page_size_ceiling,
            reviews: create_rw_signal(Vec::new()),
            loading: create_rw_signal(true),
            filters: create_rw_signal(ReviewFilters::default()),
            selected: create_rw_signal(None),
            on_deleted: None,
        }
    }

    /// Called after every successful delete, since removing a review changes
    /// the teacher's aggregate ratings.
    pub fn on_deleted(mut self, callback: Callback<()>) -> Self {
        self.on_deleted = Some(callback);
        self
    }

    pub fn reviews(&self) -> ReadSignal<Vec<Review>> {
        self.reviews.read_only()
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.loading.read_only()
    }

    pub fn filters(&self) -> ReadSignal<ReviewFilters> {
        self.filters.read_only()
    }

    pub fn selected(&self) -> ReadSignal<Option<Review>> {
        self.selected.read_only()
    }

    pub async fn load(&self) {
        self.loading.set(true);
        let query = self.filters.with_untracked(|filters| filters.to_query(self.page_size));
        match self.api.list_reviews_for_admin(&query).await {
            Ok(page) => self.reviews.set(page.results),
            Err(err) => {
                error!("[REVIEWS] loading the list failed: {}", err);
                self.notifier.error("Failed to load reviews");
            }
        }
        self.loading.set(false);
    }

    pub fn view(&self, review: Review) {
        self.selected.set(Some(review));
    }

    pub fn close_view(&self) {
        self.selected.set(None);
    }

    pub fn set_filter(&self, field: ReviewFilterField, value: String) {
        self.filters.update(|filters| filters.set(field, value));
    }

    pub async fn apply_filters(&self) {
        self.load().await;
    }

    pub async fn delete(&self, review: &Review) -> bool {
        let prompt = format!(
            "Delete the review \"{}\"? This will change the teacher's rating statistics.",
            review.display_title()
        );
        if !self.confirm.confirm(&prompt) {
            return false;
        }

        match self.api.delete_review(review.id).await {
            Ok(()) => {
                self.notifier.success("Review deleted");
                self.load().await;
                if let Some(callback) = &self.on_deleted {
                    callback.call(());
                }
                true
            }
            Err(err) => {
                error!("[REVIEWS] deleting review {} failed: {}", review.id, err);
                self.notifier.error(DELETE_NETWORK_FAILURE);
                false
            }
        }
    }
}

/// Headline figures for the review tab, computed from the loaded list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewTotals {
    pub reviews: usize,
    /// Mean overall rating; 0 for an empty list.
    pub average_rating: f64,
    /// Reviews rated 2 or lower.
    pub low_rated: usize,
    /// Distinct teachers the reviews are about.
    pub teachers: usize,
}

const LOW_RATING: u8 = 2;

pub fn review_totals(reviews: &[Review]) -> ReviewTotals {
    if reviews.is_empty() {
        return ReviewTotals::default();
    }
    let rating_sum: u32 = reviews
        .iter()
        .map(|review| u32::from(review.overall_rating.get()))
        .sum();
    let teachers: HashSet<u64> = reviews.iter().map(|review| review.teacher.id).collect();
    ReviewTotals {
        reviews: reviews.len(),
        average_rating: f64::from(rating_sum) / reviews.len() as f64,
        low_rated: reviews
            .iter()
            .filter(|review| review.overall_rating.get() <= LOW_RATING)
            .count(),
        teachers: teachers.len(),
    }
}
