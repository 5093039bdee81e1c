use chrono::{Duration, Utc};
use docstore::Repository;
use shop_admin::config::ShopConfig;
use shop_admin::lifecycle::ShopSystem;
use shop_admin::model::{
    ListParams, ProductCreate, ProductListParams, ProductUpdate, ReferenceCreate,
    ReferenceUpdate, ReviewCreate, ReviewListParams, UserCreate, UserId, UserListParams,
    UserStatus, UserUpdate,
};
use shop_admin::product_actor::ProductError;
use shop_admin::reference_actor::ReferenceError;
use shop_admin::response::{ApiError, ApiResponse, ErrorKind};
use shop_admin::review_actor::ReviewError;
use shop_admin::user_actor::UserError;

fn product(name: &str, slug: &str) -> ProductCreate {
    ProductCreate {
        name: name.to_string(),
        slug: slug.to_string(),
        price: 20.0,
        count_in_stock: 10,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_user_accounts() {
    let system = ShopSystem::start(&ShopConfig::default());

    let alice = system
        .users
        .create_user(UserCreate::new("alice@example.com", "Alice", "Smith"))
        .await
        .unwrap();
    assert_eq!(alice.status, UserStatus::Active);

    let duplicate = system
        .users
        .create_user(UserCreate::new("ALICE@example.com", "Other", "Alice"))
        .await
        .unwrap_err();
    assert_eq!(duplicate.kind(), ErrorKind::AlreadyExists);

    let change_email = system
        .users
        .update_user(
            alice.id,
            UserUpdate {
                email: Some("new@example.com".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert_eq!(change_email, Err(UserError::ImmutableField("email")));
    let response = ApiResponse::<()>::failure(&change_email.unwrap_err());
    assert_eq!(response.status, 400);
    assert_eq!(response.message, "You can't change your email");

    let renamed = system
        .users
        .update_user(
            alice.id,
            UserUpdate {
                middle_name: Some("Jane".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.full_name(), "Alice Jane Smith");

    system
        .users
        .create_user(UserCreate::new("bob@example.com", "Bob", "Stone"))
        .await
        .unwrap();
    let search = UserListParams {
        list: ListParams {
            search: Some("bob".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let found = system.users.list_users(&search).await.unwrap();
    assert_eq!(found.total_count, 1);
    assert_eq!(found.items[0].email, "bob@example.com");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_product_slug_is_unique() {
    let system = ShopSystem::start(&ShopConfig::default());

    let keyboard = system
        .products
        .create_product(product("Keyboard", "keyboard"))
        .await
        .unwrap();
    let mouse = system
        .products
        .create_product(product("Mouse", "mouse"))
        .await
        .unwrap();

    assert_eq!(
        system
            .products
            .create_product(product("Keyboard 2", "keyboard"))
            .await,
        Err(ProductError::AlreadyExists("keyboard".to_string()))
    );

    let rename = ProductUpdate {
        slug: Some("keyboard".to_string()),
        ..Default::default()
    };
    assert_eq!(
        system.products.update_product(mouse.id, rename).await,
        Err(ProductError::AlreadyExists("keyboard".to_string()))
    );

    let removed = system
        .products
        .delete_many(vec![keyboard.id, mouse.id])
        .await
        .unwrap();
    assert_eq!(removed, 2);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_likes_update_both_sides() {
    let system = ShopSystem::start(&ShopConfig::default());
    let alice = system
        .users
        .create_user(UserCreate::new("alice@example.com", "Alice", "Smith"))
        .await
        .unwrap();
    let keyboard = system
        .products
        .create_product(product("Keyboard", "keyboard"))
        .await
        .unwrap();

    let liked = system
        .products
        .like_product(keyboard.id, alice.id)
        .await
        .unwrap();
    assert_eq!(liked.total_likes, 1);
    let user = system.users.user_details(alice.id).await.unwrap();
    assert_eq!(user.liked_products, vec![keyboard.id]);

    let twice = system
        .products
        .like_product(keyboard.id, alice.id)
        .await
        .unwrap_err();
    assert_eq!(twice.kind(), ErrorKind::Invalid);

    let unknown_user = system
        .products
        .like_product(keyboard.id, UserId(99))
        .await
        .unwrap_err();
    assert_eq!(unknown_user.kind(), ErrorKind::NotFound);
    let current = system.products.product_details(keyboard.id).await.unwrap();
    assert_eq!(current.total_likes, 1);
    assert_eq!(current.liked_by, vec![alice.id]);

    let unliked = system
        .products
        .unlike_product(keyboard.id, alice.id)
        .await
        .unwrap();
    assert_eq!(unliked.total_likes, 0);
    let user = system.users.user_details(alice.id).await.unwrap();
    assert!(user.liked_products.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_expire_discounts() {
    let system = ShopSystem::start(&ShopConfig::default());
    let now = Utc::now();

    let ended = system
        .products
        .create_product(ProductCreate {
            discount: Some(20),
            discount_start_date: Some(now - Duration::days(10)),
            discount_end_date: Some(now - Duration::days(1)),
            ..product("Ended", "ended")
        })
        .await
        .unwrap();
    let running = system
        .products
        .create_product(ProductCreate {
            discount: Some(15),
            discount_start_date: Some(now - Duration::days(1)),
            discount_end_date: Some(now + Duration::days(5)),
            ..product("Running", "running")
        })
        .await
        .unwrap();
    system
        .products
        .create_product(product("Plain", "plain"))
        .await
        .unwrap();

    assert_eq!(system.products.expire_discounts(now).await.unwrap(), 1);

    let ended = system.products.product_details(ended.id).await.unwrap();
    assert_eq!(ended.discount, 0);
    assert_eq!(ended.discount_end_date, None);
    let running = system.products.product_details(running.id).await.unwrap();
    assert_eq!(running.discount, 15);

    assert_eq!(system.products.expire_discounts(now).await.unwrap(), 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reviews_and_ratings() {
    let system = ShopSystem::start(&ShopConfig::default());
    let keyboards = system
        .product_types
        .create_product_type(ReferenceCreate::new("Keyboards"))
        .await
        .unwrap();
    let keyboard = system
        .products
        .create_product(ProductCreate {
            product_type: keyboards.id,
            ..product("Keyboard", "keyboard")
        })
        .await
        .unwrap();
    let mouse = system
        .products
        .create_product(product("Mouse", "mouse"))
        .await
        .unwrap();

    for (user, star) in [(1, 5), (2, 4)] {
        system
            .reviews
            .create_review(ReviewCreate {
                content: "Solid".to_string(),
                star,
                product: keyboard.id,
                user: UserId(user),
            })
            .await
            .unwrap();
    }
    assert_eq!(
        system
            .reviews
            .create_review(ReviewCreate {
                content: "Too many stars".to_string(),
                star: 6,
                product: mouse.id,
                user: UserId(1),
            })
            .await,
        Err(ReviewError::InvalidStar(6))
    );

    let by_product = ReviewListParams {
        products: vec![keyboard.id],
        ..Default::default()
    };
    assert_eq!(
        system.reviews.list_reviews(&by_product).await.unwrap().total_count,
        2
    );

    let catalog = system
        .products
        .list_products(&ProductListParams {
            list: ListParams {
                order: Some("name asc".to_string()),
                ..Default::default()
            },
            all: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(catalog.total_page, 1);
    assert_eq!(catalog.items[0].product_type.id, keyboards.id);
    assert_eq!(
        catalog.items[0].product_type.name.as_deref(),
        Some("Keyboards")
    );
    assert_eq!(catalog.items[1].product_type.name, None);
    let ratings: Vec<(String, f64)> = catalog
        .items
        .into_iter()
        .map(|summary| (summary.name, summary.average_rating))
        .collect();
    assert_eq!(
        ratings,
        vec![("Keyboard".to_string(), 4.5), ("Mouse".to_string(), 0.0)]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reference_data() {
    let system = ShopSystem::start(&ShopConfig::default());

    let hanoi = system
        .cities
        .create_city(ReferenceCreate::new("Hanoi"))
        .await
        .unwrap();
    system
        .cities
        .create_city(ReferenceCreate::new("Da Nang"))
        .await
        .unwrap();
    assert_eq!(
        system.cities.create_city(ReferenceCreate::new("hanoi")).await,
        Err(ReferenceError::AlreadyExists("hanoi".to_string()))
    );

    let renamed = system
        .cities
        .update_city(
            hanoi.id,
            ReferenceUpdate {
                name: Some("Ha Noi".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Ha Noi");

    let listed = system
        .cities
        .list_cities(&ListParams {
            search: Some("nang".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.total_count, 1);
    assert_eq!(listed.items[0].name, "Da Nang");

    let card = system
        .payment_types
        .create_payment_type(ReferenceCreate::new("Card"))
        .await
        .unwrap();
    system.payment_types.delete(card.id).await.unwrap();
    assert_eq!(
        system.payment_types.payment_type_details(card.id).await,
        Err(ReferenceError::NotFound(card.id.to_string()))
    );

    system.shutdown().await.unwrap();
}
