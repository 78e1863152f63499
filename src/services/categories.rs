use crate::domain::auth::{AuthenticatedUser, SellerAccess};
use crate::domain::category::Category;
use crate::forms::categories::AddCategoryForm;
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult, ensure_seller};

/// Active categories for the storefront.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    repo.list_categories(true).map_err(ServiceError::from)
}

/// Creates a category; the slug is derived from the name on insert.
pub fn create_category<R>(
    repo: &R,
    access: &SellerAccess,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    ensure_seller(access, user)?;

    let new_category = form.into_new_category()?;

    let duplicate = repo
        .list_categories(false)
        .map_err(ServiceError::from)?
        .iter()
        .any(|category| category.name.eq_ignore_ascii_case(&new_category.name));
    if duplicate {
        return Err(ServiceError::form("Category with this name already exists"));
    }

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}
