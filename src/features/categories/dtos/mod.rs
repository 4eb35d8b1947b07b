mod category_dto;

pub use category_dto::{
    CategoryLabelDto, CategoryOptionDto, CategoryResponseDto, UpsertCategoryDto,
};
