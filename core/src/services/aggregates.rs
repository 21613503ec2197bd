//! Maintenance of the derived aggregate fields on companies.
//!
//! Every mutation of a company's jobs or reviews refreshes the matching
//! aggregate after the write commits. The window between the two writes is
//! accepted: readers may briefly see an aggregate one mutation behind, and
//! the next mutation converges it.

use uuid::Uuid;

use crate::errors::DomainResult;
use crate::repositories::{CompanyRepository, JobRepository, ReviewRepository};

/// Recomputes a company's average salary as the ceiling of the mean over
/// its jobs; clears the field when no jobs remain
pub async fn refresh_average_salary<J, C>(jobs: &J, companies: &C, company: Uuid) -> DomainResult<()>
where
    J: JobRepository + ?Sized,
    C: CompanyRepository + ?Sized,
{
    let value = jobs
        .average_salary(company)
        .await?
        .map(|mean| mean.ceil() as u64);
    companies.set_average_salary(company, value).await
}

/// Recomputes a company's average rating as the mean over its reviews;
/// clears the field when no reviews remain
pub async fn refresh_average_rating<R, C>(
    reviews: &R,
    companies: &C,
    company: Uuid,
) -> DomainResult<()>
where
    R: ReviewRepository + ?Sized,
    C: CompanyRepository + ?Sized,
{
    let value = reviews.average_rating(company).await?;
    companies.set_average_rating(company, value).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Company, Industry, Job, MinimumSkill, Review};
    use crate::repositories::{MockCompanyRepository, MockJobRepository, MockReviewRepository};

    async fn company(companies: &MockCompanyRepository) -> Company {
        let company = Company::new(
            "Acme".to_string(),
            "Anvils".to_string(),
            vec![Industry::Tech],
            Uuid::new_v4(),
        );
        companies.seed(company.clone()).await;
        company
    }

    fn job(company: Uuid, salary: u64) -> Job {
        Job::new(
            "Engineer".to_string(),
            "Builds things".to_string(),
            2,
            salary,
            MinimumSkill::Junior,
            false,
            company,
            Uuid::new_v4(),
        )
    }

    #[tokio::test]
    async fn test_average_salary_is_ceiled_mean() {
        let companies = MockCompanyRepository::new();
        let jobs = MockJobRepository::new();
        let target = company(&companies).await;

        jobs.seed(job(target.id, 10000)).await;
        jobs.seed(job(target.id, 10001)).await;

        refresh_average_salary(&jobs, &companies, target.id)
            .await
            .unwrap();

        let stored = companies.find_by_id(target.id).await.unwrap().unwrap();
        // mean 10000.5 rounds up
        assert_eq!(stored.average_salary, Some(10001));
    }

    #[tokio::test]
    async fn test_average_salary_cleared_when_no_jobs() {
        let companies = MockCompanyRepository::new();
        let jobs = MockJobRepository::new();
        let target = company(&companies).await;

        companies
            .set_average_salary(target.id, Some(5000))
            .await
            .unwrap();
        refresh_average_salary(&jobs, &companies, target.id)
            .await
            .unwrap();

        let stored = companies.find_by_id(target.id).await.unwrap().unwrap();
        assert_eq!(stored.average_salary, None);
    }

    #[tokio::test]
    async fn test_average_rating_is_plain_mean() {
        let companies = MockCompanyRepository::new();
        let reviews = MockReviewRepository::new();
        let target = company(&companies).await;

        reviews
            .seed(Review::new(
                "Good".to_string(),
                "Liked it".to_string(),
                8,
                target.id,
                Uuid::new_v4(),
            ))
            .await;
        reviews
            .seed(Review::new(
                "Okay".to_string(),
                "Fine".to_string(),
                5,
                target.id,
                Uuid::new_v4(),
            ))
            .await;

        refresh_average_rating(&reviews, &companies, target.id)
            .await
            .unwrap();

        let stored = companies.find_by_id(target.id).await.unwrap().unwrap();
        assert_eq!(stored.average_rating, Some(6.5));
    }

    #[tokio::test]
    async fn test_average_rating_cleared_when_no_reviews() {
        let companies = MockCompanyRepository::new();
        let reviews = MockReviewRepository::new();
        let target = company(&companies).await;

        companies
            .set_average_rating(target.id, Some(7.0))
            .await
            .unwrap();
        refresh_average_rating(&reviews, &companies, target.id)
            .await
            .unwrap();

        let stored = companies.find_by_id(target.id).await.unwrap().unwrap();
        assert_eq!(stored.average_rating, None);
    }
}
