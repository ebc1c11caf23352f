use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Post {
    Table,
    Id,
    Kind,
    Slug,
    Title,
    Content,
    Status,
    AuthorId,
    Date,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum PostMeta {
    Table,
    PostId,
    Key,
    Value,
}

#[derive(Iden, Clone)]
pub enum Category {
    Table,
    Id,
    Name,
    ParentId,
}

#[derive(Iden, Clone)]
pub enum PostCategory {
    Table,
    PostId,
    CategoryId,
}
