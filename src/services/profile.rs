use crate::domain::auth::AuthenticatedUser;
use crate::domain::customer::{CustomerProfile, NewCustomerProfile};
use crate::forms::profile::ProfileForm;
use crate::repository::{ProfileReader, ProfileWriter};
use crate::services::{ServiceError, ServiceResult};

/// Profile of the caller, created empty on first access.
pub fn load_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<CustomerProfile>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    if let Some(profile) = repo.get_profile(user.id).map_err(ServiceError::from)? {
        return Ok(profile);
    }

    repo.create_profile(&NewCustomerProfile::empty(user.id, user.name.clone()))
        .map_err(ServiceError::from)
}

/// Apply a partial update to the caller's profile.
pub fn update_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProfileForm,
) -> ServiceResult<CustomerProfile>
where
    R: ProfileReader + ProfileWriter + ?Sized,
{
    let updates = form.into_update()?;
    load_profile(repo, user)?;

    repo.update_profile(user.id, &updates)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::tests::complete_profile;
    use crate::repository::mock::MockRepo;
    use crate::services::tests::customer;

    #[test]
    fn missing_profile_is_created_with_user_name() {
        let mut repo = MockRepo::new();
        repo.profiles.expect_get_profile().returning(|_| Ok(None));
        repo.profile_writer
            .expect_create_profile()
            .times(1)
            .withf(|profile| profile.user_id == 4 && profile.name == "Customer 4" && profile.phone.is_empty())
            .returning(|profile| {
                let mut stored = complete_profile(profile.user_id);
                stored.name = profile.name.clone();
                stored.phone.clear();
                Ok(stored)
            });

        let profile = load_profile(&repo, &customer(4)).unwrap();

        assert_eq!(profile.name, "Customer 4");
        assert!(!profile.is_complete());
    }

    #[test]
    fn update_passes_only_supplied_fields() {
        let mut repo = MockRepo::new();
        repo.profiles
            .expect_get_profile()
            .returning(|user_id| Ok(Some(complete_profile(user_id))));
        repo.profile_writer
            .expect_update_profile()
            .times(1)
            .withf(|user_id, updates| {
                *user_id == 2 && updates.city.as_deref() == Some("Austin") && updates.name.is_none()
            })
            .returning(|user_id, _| {
                let mut stored = complete_profile(user_id);
                stored.city = "Austin".into();
                Ok(stored)
            });

        let form: ProfileForm = serde_json::from_str(r#"{"city": "Austin"}"#).unwrap();
        let profile = update_profile(&repo, &customer(2), form).unwrap();

        assert_eq!(profile.city, "Austin");
    }
}
