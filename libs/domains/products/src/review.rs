//! Review operations on the product aggregate.
//!
//! Each operation either applies fully or returns a [`ReviewError`] before
//! touching the product. Persisting the result is the caller's job.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Product, Review};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Product already reviewed by user {0}")]
    DuplicateUserReview(Uuid),

    #[error("User {0} has not reviewed this product")]
    UserHasNoReview(Uuid),
}

impl Product {
    pub fn review_by(&self, user: Uuid) -> Option<&Review> {
        self.reviews.iter().find(|r| r.user == user)
    }

    fn review_index(&self, user: Uuid) -> Result<usize, ReviewError> {
        self.reviews
            .iter()
            .position(|r| r.user == user)
            .ok_or(ReviewError::UserHasNoReview(user))
    }

    /// Append a review; one review per user.
    pub fn add_review(&mut self, review: Review) -> Result<(), ReviewError> {
        if self.review_by(review.user).is_some() {
            return Err(ReviewError::DuplicateUserReview(review.user));
        }

        self.reviews.push(review);
        self.num_reviews += 1;
        self.recompute_rating();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replace the author's existing review in place.
    ///
    /// The original `createdAt` is kept; `updatedAt` is refreshed.
    pub fn edit_review(&mut self, review: Review) -> Result<(), ReviewError> {
        let index = self.review_index(review.user)?;
        let now = Utc::now();

        let created_at = self.reviews[index].created_at;
        self.reviews[index] = Review {
            created_at,
            updated_at: now,
            ..review
        };
        self.recompute_rating();
        self.updated_at = now;
        Ok(())
    }

    /// Remove `user`'s review and return it.
    pub fn delete_review(&mut self, user: Uuid) -> Result<Review, ReviewError> {
        let index = self.review_index(user)?;

        let removed = self.reviews.remove(index);
        self.num_reviews -= 1;
        self.recompute_rating();
        self.updated_at = Utc::now();
        Ok(removed)
    }

    /// `ceil(mean)` of the review ratings, or 0 without reviews.
    pub(crate) fn recompute_rating(&mut self) {
        let count = self.reviews.len() as u32;
        self.rating = if count == 0 {
            0
        } else {
            let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating.value())).sum();
            sum.div_ceil(count) as i32
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateProduct, Rating, ReviewInput};

    fn product() -> Product {
        Product::new(CreateProduct {
            name: "Jollof rice".to_string(),
            price: 2000.0,
            count_in_stock: 10,
            description: "Jellof rice as you like it".to_string(),
            image: None,
            is_active: true,
        })
    }

    fn review(user: Uuid, rating: u8) -> Review {
        Review::new(
            user,
            ReviewInput {
                rating: Rating::new(rating).unwrap(),
                comment: "Great food, would order again".to_string(),
            },
        )
        .unwrap()
    }

    fn with_ratings(ratings: &[u8]) -> Product {
        let mut p = product();
        for &r in ratings {
            p.add_review(review(Uuid::now_v7(), r)).unwrap();
        }
        p
    }

    #[test]
    fn test_rating_is_ceiling_of_mean() {
        assert_eq!(with_ratings(&[]).rating(), 0);
        assert_eq!(with_ratings(&[3]).rating(), 3);
        assert_eq!(with_ratings(&[3, 4]).rating(), 4);
        // mean 3.2 rounds up, not to nearest
        assert_eq!(with_ratings(&[3, 3, 3, 3, 4]).rating(), 4);
        assert_eq!(with_ratings(&[1, 1, 2]).rating(), 2);
        assert_eq!(with_ratings(&[5, 5]).rating(), 5);
    }

    #[test]
    fn test_add_review_increments_count() {
        let mut p = product();
        let user = Uuid::now_v7();

        p.add_review(review(user, 4)).unwrap();

        assert_eq!(p.num_reviews(), 1);
        assert_eq!(p.reviews().len(), 1);
        assert_eq!(p.rating(), 4);
        assert!(p.review_by(user).is_some());
    }

    #[test]
    fn test_duplicate_review_leaves_state_unchanged() {
        let user = Uuid::now_v7();
        let mut p = product();
        p.add_review(review(user, 2)).unwrap();
        let before = p.clone();

        let err = p.add_review(review(user, 5)).unwrap_err();

        assert_eq!(err, ReviewError::DuplicateUserReview(user));
        assert_eq!(p, before);
    }

    #[test]
    fn test_edit_review_replaces_only_that_users_review() {
        let (alice, bob) = (Uuid::now_v7(), Uuid::now_v7());
        let mut p = product();
        p.add_review(review(alice, 2)).unwrap();
        p.add_review(review(bob, 2)).unwrap();
        let bob_before = p.review_by(bob).cloned().unwrap();
        let alice_created = p.review_by(alice).unwrap().created_at;

        p.edit_review(review(alice, 5)).unwrap();

        assert_eq!(p.num_reviews(), 2);
        assert_eq!(p.rating(), 4); // ceil(7 / 2)
        assert_eq!(p.review_by(bob), Some(&bob_before));

        let edited = p.review_by(alice).unwrap();
        assert_eq!(edited.rating.value(), 5);
        assert_eq!(edited.created_at, alice_created);
        assert!(edited.updated_at >= alice_created);
        assert_eq!(p.reviews()[0].user, alice);
    }

    #[test]
    fn test_edit_without_review_fails() {
        let mut p = with_ratings(&[3]);
        let before = p.clone();
        let stranger = Uuid::now_v7();

        let err = p.edit_review(review(stranger, 1)).unwrap_err();

        assert_eq!(err, ReviewError::UserHasNoReview(stranger));
        assert_eq!(p, before);
    }

    #[test]
    fn test_delete_review_decrements_count() {
        let user = Uuid::now_v7();
        let mut p = with_ratings(&[1]);
        p.add_review(review(user, 5)).unwrap();
        assert_eq!(p.rating(), 3);

        let removed = p.delete_review(user).unwrap();

        assert_eq!(removed.user, user);
        assert_eq!(p.num_reviews(), 1);
        assert_eq!(p.rating(), 1);
        assert!(p.review_by(user).is_none());
    }

    #[test]
    fn test_delete_last_review_resets_rating() {
        let user = Uuid::now_v7();
        let mut p = product();
        p.add_review(review(user, 4)).unwrap();

        p.delete_review(user).unwrap();

        assert_eq!(p.num_reviews(), 0);
        assert_eq!(p.rating(), 0);
    }

    #[test]
    fn test_delete_without_review_leaves_state_unchanged() {
        let mut p = with_ratings(&[2, 4]);
        let before = p.clone();
        let stranger = Uuid::now_v7();

        let err = p.delete_review(stranger).unwrap_err();

        assert_eq!(err, ReviewError::UserHasNoReview(stranger));
        assert_eq!(p, before);
    }
}
