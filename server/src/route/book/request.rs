use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{
    CreateBookDto, DeleteBookDto, GetAllBookDto, GetBookDto, UpdateBookDto,
};
use kernel::prelude::entity::{SelectLimit, SelectPage};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    description: String,
    isbn: Option<String>,
    published_year: Option<i32>,
    genre: Option<String>,
    cover_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    title: Option<String>,
    author: Option<String>,
    description: Option<String>,
    isbn: Option<String>,
    published_year: Option<i32>,
    genre: Option<String>,
    cover_image: Option<String>,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetAllRequest {
    search: Option<String>,
    page: Option<i64>,
    limit: Option<i64>,
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            description: input.description,
            isbn: input.isbn,
            published_year: input.published_year,
            genre: input.genre,
            cover_image: input.cover_image,
        }
    }
}

impl Intake<(Uuid, UpdateRequest)> for Transformer {
    type To = UpdateBookDto;
    fn emit(&self, input: (Uuid, UpdateRequest)) -> Self::To {
        let (id, input) = input;
        UpdateBookDto {
            id,
            title: input.title,
            author: input.author,
            description: input.description,
            isbn: input.isbn,
            published_year: input.published_year,
            genre: input.genre,
            cover_image: input.cover_image,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl Intake<GetAllRequest> for Transformer {
    type To = GetAllBookDto;
    fn emit(&self, input: GetAllRequest) -> Self::To {
        GetAllBookDto {
            search: input.search,
            page: input.page.map(SelectPage::new).unwrap_or_default(),
            limit: input.limit.map(SelectLimit::new).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{GetAllRequest, Transformer};
    use crate::controller::Intake;

    #[test]
    fn paging_defaults_to_first_ten() {
        let request = GetAllRequest {
            search: None,
            page: None,
            limit: None,
        };
        let dto = Transformer.emit(request);
        assert_eq!(*dto.page.as_ref(), 1);
        assert_eq!(*dto.limit.as_ref(), 10);
    }
}
