//! Test fixtures for attribute classification
//!
//! Small domains modelled after typical application schemas. Each helper
//! returns an owned [`Domain`]; tests borrow attributes out of it.

#![allow(dead_code)]

use erdly_core::{Association, AssociationKind, Column, ColumnType, Domain, Model, Validation};

/// Single model `Foo` with the given columns and an `id` primary key
pub fn single_model(columns: Vec<Column>) -> Domain {
    let model = columns
        .into_iter()
        .fold(Model::new("Foo"), |model, column| model.with_column(column));
    Domain::from_models("test", vec![model])
}

/// Blog domain
///
/// - `User` has many posts through `author_id`, and carries an unrelated
///   `author_id` column of its own (a pen name reference)
/// - `Post` belongs to a category and has a presence validation on `title`
/// - `Category` declares nothing about posts
/// - `Comment` is only referenced from `Post` (`has_many`), never declares it
pub fn blog() -> Domain {
    Domain::from_models("blog", vec![
        Model::new("User")
            .with_column(Column::new("id", ColumnType::Integer).not_null())
            .with_column(Column::new("email", ColumnType::String).with_limit(255).not_null())
            .with_column(Column::new("name", ColumnType::String))
            .with_column(Column::new("created_at", ColumnType::Datetime))
            .with_column(Column::new("updated_at", ColumnType::Datetime))
            .with_column(Column::new("author_id", ColumnType::Integer))
            .with_association(Association::has_many("posts", "Post", "author_id")),
        Model::new("Post")
            .with_column(Column::new("id", ColumnType::Integer).not_null())
            .with_column(Column::new("title", ColumnType::String))
            .with_column(Column::new("body", ColumnType::Text))
            .with_column(Column::new("author_id", ColumnType::Integer))
            .with_column(Column::new("category_id", ColumnType::Integer))
            .with_column(Column::new("published", ColumnType::Boolean).not_null().with_default("false"))
            .with_association(Association::belongs_to("category", "Category"))
            .with_association(Association::new(
                "comments",
                AssociationKind::HasMany,
                "Comment",
                "post_id",
            ))
            .with_validation(Validation::presence(["title"])),
        Model::new("Category")
            .with_column(Column::new("id", ColumnType::Integer))
            .with_column(Column::new("name", ColumnType::String)),
        Model::new("Comment")
            .with_column(Column::new("id", ColumnType::Integer))
            .with_column(Column::new("post_id", ColumnType::Integer))
            .with_column(Column::new("text", ColumnType::Text)),
    ])
}

/// One-to-one domain: `Owner` has one `Profile` through `owner_id`
///
/// `Profile` declares no association back to its owner.
pub fn profile_domain() -> Domain {
    Domain::from_models("profiles", vec![
        Model::new("Owner")
            .with_column(Column::new("id", ColumnType::Integer))
            .with_column(Column::new("owner_id", ColumnType::Integer))
            .with_association(Association::has_one("profile", "Profile", "owner_id")),
        Model::new("Profile")
            .with_column(Column::new("id", ColumnType::Integer))
            .with_column(Column::new("owner_id", ColumnType::Integer))
            .with_column(Column::new("bio", ColumnType::Text)),
    ])
}

/// Model with a custom primary key
pub fn legacy_domain() -> Domain {
    Domain::from_models("legacy", vec![
        Model::new("Account")
            .with_primary_key(Some("account_number"))
            .with_column(Column::new("account_number", ColumnType::String))
            .with_column(Column::new("id", ColumnType::Integer)),
        Model::new("Event")
            .with_primary_key(None)
            .with_column(Column::new("id", ColumnType::Integer))
            .with_column(Column::new("payload", ColumnType::Json)),
    ])
}

/// Self-referential tree of categories
pub fn tree_domain() -> Domain {
    Domain::from_models("tree", vec![
        Model::new("Node")
            .with_column(Column::new("id", ColumnType::Integer))
            .with_column(Column::new("parent_id", ColumnType::Integer))
            .with_column(Column::new("label", ColumnType::String))
            .with_association(Association::has_many("children", "Node", "parent_id")),
    ])
}

/// JSON form of a small domain, as the CLI reads it
pub const SHOP_JSON: &str = r#"{
    "name": "shop",
    "models": [
        {
            "name": "Customer",
            "primary_key": "id",
            "columns": [
                {"name": "id", "type": "integer", "null_allowed": false},
                {"name": "email", "type": "string", "limit": 255, "null_allowed": false},
                {"name": "created_on", "type": "date"}
            ],
            "associations": [
                {"name": "orders", "kind": "has_many", "target": "Order", "foreign_key": "buyer_id"}
            ]
        },
        {
            "name": "Order",
            "primary_key": "id",
            "columns": [
                {"name": "id", "type": "integer", "null_allowed": false},
                {"name": "buyer_id", "type": "integer"},
                {"name": "total", "type": "decimal", "precision": 10, "scale": 2},
                {"name": "notes", "type": "text", "limit": 65535}
            ],
            "validations": [
                {"kind": "presence", "attributes": ["total"]}
            ]
        }
    ]
}"#;
