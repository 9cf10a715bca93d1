use uuid::Uuid;

use souk_config::{Config, Postgres, Query, Service, Storage};
use souk_domain::{Catalogue, CatalogueLine, Classification, LocalizedText, SortOption, TextField};
use souk_service::{
	AddLineRequest, BrowseRequest, CatalogueService, DeleteLineRequest, Error, LineFetchRequest,
	UpdateLineRequest,
};
use souk_storage::{catalogues, db::Db};
use souk_testkit::TestDatabase;

fn test_config(dsn: &str) -> Config {
	Config {
		service: Service { log_level: "info".to_string() },
		storage: Storage {
			postgres: Postgres { dsn: dsn.to_string(), pool_max_conns: 2 },
		},
		query: Query { max_page_limit: 100, text_search_config: "simple".to_string() },
	}
}

async fn service_for(test_db: &TestDatabase) -> CatalogueService {
	let cfg = test_config(test_db.dsn());
	let db = Db::connect(&cfg.storage.postgres).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	CatalogueService::new(cfg, db)
}

fn line(
	line_id: &str,
	name: &str,
	category: &str,
	price: Option<f64>,
	description: Option<(&str, &str)>,
) -> CatalogueLine {
	CatalogueLine {
		line_id: line_id.to_string(),
		manufacturer_item_id: None,
		manufacturer_party_id: "P1".to_string(),
		item_name: name.to_string(),
		price_amount: price,
		classifications: vec![Classification { code: None, name: category.to_string() }],
		texts: description
			.iter()
			.map(|(language_id, value)| LocalizedText {
				language_id: language_id.to_string(),
				field: TextField::Description,
				value: value.to_string(),
			})
			.collect(),
	}
}

fn browse(catalogue_id: &str, party_id: &str) -> BrowseRequest {
	BrowseRequest {
		catalogue_id: catalogue_id.to_string(),
		party_id: party_id.to_string(),
		category_name: None,
		search_text: None,
		language_id: None,
		sort: SortOption::None,
		limit: 10,
		offset: 0,
	}
}

/// The worked catalogue from the browse contract: five lines under party P1,
/// three tagged Tools (prices 10, 5, none) and two tagged Electronics
/// (prices 20, 15), inserted in that order.
async fn seed_worked_catalogue(service: &CatalogueService) -> Uuid {
	let uuid = Uuid::new_v4();

	catalogues::insert_catalogue(
		&service.db,
		&Catalogue {
			catalogue_id: "C1".to_string(),
			uuid,
			provider_party_id: "P1".to_string(),
		},
	)
	.await
	.expect("Failed to insert catalogue.");

	for seeded in [
		line("L1", "Claw hammer", "Tools", Some(10.0), Some(("en", "Steel claw hammer."))),
		line("L2", "Hand saw", "Tools", Some(5.0), Some(("en", "Fine-toothed hand saw."))),
		line("L3", "Torque wrench", "Tools", None, Some(("de", "Drehmomentschlüssel."))),
		line("L4", "Laser level", "Electronics", Some(20.0), None),
		line("L5", "Stud finder", "Electronics", Some(15.0), None),
	] {
		service
			.add_line(AddLineRequest { catalogue_uuid: uuid, line: seeded })
			.await
			.expect("Failed to add line.");
	}

	uuid
}

fn line_ids(page: &souk_service::PageResponse) -> Vec<&str> {
	page.lines.iter().map(|line| line.line_id.as_str()).collect()
}

fn sorted_category_names(page: &souk_service::PageResponse) -> Vec<&str> {
	let mut names = page.category_names.iter().map(String::as_str).collect::<Vec<_>>();

	names.sort();

	names
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn category_page_sorts_ascending_with_full_metadata() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping category_page_sorts_ascending_with_full_metadata; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;
	let uuid = seed_worked_catalogue(&service).await;

	let page = service
		.browse_lines(BrowseRequest {
			category_name: Some("Tools".to_string()),
			sort: SortOption::PriceLowToHigh,
			limit: 2,
			..browse("C1", "P1")
		})
		.await
		.expect("Browse must succeed.");

	assert_eq!(page.total_size, 5, "Total size must ignore the category filter.");
	assert_eq!(page.catalogue_uuid, Some(uuid));
	assert_eq!(sorted_category_names(&page), ["Electronics", "Tools"]);
	assert_eq!(line_ids(&page), ["L2", "L1"]);
	assert_eq!(page.lines[0].price_amount, Some(5.0));
	assert_eq!(page.lines[1].price_amount, Some(10.0));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn zero_limit_returns_metadata_only() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping zero_limit_returns_metadata_only; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;
	let uuid = seed_worked_catalogue(&service).await;

	let page = service
		.browse_lines(BrowseRequest { limit: 0, ..browse("C1", "P1") })
		.await
		.expect("Browse must succeed.");

	assert_eq!(page.total_size, 5);
	assert_eq!(page.catalogue_uuid, Some(uuid));
	assert_eq!(sorted_category_names(&page), ["Electronics", "Tools"]);
	assert!(page.lines.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn unknown_catalogue_yields_the_defined_empty_page() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping unknown_catalogue_yields_the_defined_empty_page; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;

	seed_worked_catalogue(&service).await;

	let page = service
		.browse_lines(browse("CX", "P1"))
		.await
		.expect("Browse of a missing catalogue must not fail.");

	assert_eq!(page.total_size, 0);
	assert_eq!(page.catalogue_uuid, None);
	assert!(page.category_names.is_empty());
	assert!(page.lines.is_empty());

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn metadata_is_invariant_under_filters_and_sort() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping metadata_is_invariant_under_filters_and_sort; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;

	seed_worked_catalogue(&service).await;

	let unfiltered =
		service.browse_lines(browse("C1", "P1")).await.expect("Browse must succeed.");
	let filtered = service
		.browse_lines(BrowseRequest {
			category_name: Some("Electronics".to_string()),
			search_text: Some("hammer".to_string()),
			language_id: Some("en".to_string()),
			sort: SortOption::PriceHighToLow,
			..browse("C1", "P1")
		})
		.await
		.expect("Browse must succeed.");

	assert_eq!(filtered.total_size, unfiltered.total_size);
	assert_eq!(sorted_category_names(&filtered), sorted_category_names(&unfiltered));
	assert!(filtered.lines.is_empty(), "No Electronics line mentions a hammer.");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn descending_sort_puts_unpriced_lines_last() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping descending_sort_puts_unpriced_lines_last; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;

	seed_worked_catalogue(&service).await;

	let page = service
		.browse_lines(BrowseRequest {
			category_name: Some("Tools".to_string()),
			sort: SortOption::PriceHighToLow,
			..browse("C1", "P1")
		})
		.await
		.expect("Browse must succeed.");

	assert_eq!(line_ids(&page), ["L1", "L2", "L3"]);
	assert_eq!(page.lines[2].price_amount, None);

	let prices = page.lines.iter().filter_map(|line| line.price_amount).collect::<Vec<_>>();

	assert!(prices.windows(2).all(|pair| pair[0] >= pair[1]));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn repeated_requests_return_the_same_window() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping repeated_requests_return_the_same_window; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;

	seed_worked_catalogue(&service).await;

	let request = BrowseRequest {
		sort: SortOption::PriceLowToHigh,
		limit: 3,
		offset: 1,
		..browse("C1", "P1")
	};
	let first =
		service.browse_lines(request.clone()).await.expect("Browse must succeed.");
	let second = service.browse_lines(request).await.expect("Browse must succeed.");

	assert_eq!(line_ids(&first), line_ids(&second));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn offset_windows_partition_the_candidates() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping offset_windows_partition_the_candidates; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;

	seed_worked_catalogue(&service).await;

	let first = service
		.browse_lines(BrowseRequest { limit: 2, offset: 0, ..browse("C1", "P1") })
		.await
		.expect("Browse must succeed.");
	let second = service
		.browse_lines(BrowseRequest { limit: 2, offset: 2, ..browse("C1", "P1") })
		.await
		.expect("Browse must succeed.");
	let third = service
		.browse_lines(BrowseRequest { limit: 2, offset: 4, ..browse("C1", "P1") })
		.await
		.expect("Browse must succeed.");
	let mut seen = Vec::new();

	seen.extend(line_ids(&first));
	seen.extend(line_ids(&second));
	seen.extend(line_ids(&third));
	seen.sort();

	assert_eq!(seen, ["L1", "L2", "L3", "L4", "L5"]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn search_without_language_fails_before_the_store() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping search_without_language_fails_before_the_store; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;

	let result = service
		.browse_lines(BrowseRequest {
			search_text: Some("hammer".to_string()),
			..browse("C1", "P1")
		})
		.await;

	assert!(matches!(result, Err(Error::InvalidFilter { .. })));

	let oversized = service
		.browse_lines(BrowseRequest { limit: 101, ..browse("C1", "P1") })
		.await;

	assert!(matches!(oversized, Err(Error::InvalidRequest { .. })));

	let negative = service
		.browse_lines(BrowseRequest { offset: -1, ..browse("C1", "P1") })
		.await;

	assert!(matches!(negative, Err(Error::InvalidRequest { .. })));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SOUK_PG_DSN to run."]
async fn line_write_path_round_trips() {
	let Some(base_dsn) = souk_testkit::env_dsn() else {
		eprintln!("Skipping line_write_path_round_trips; set SOUK_PG_DSN.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = service_for(&test_db).await;
	let uuid = seed_worked_catalogue(&service).await;

	let duplicate = service
		.add_line(AddLineRequest {
			catalogue_uuid: uuid,
			line: line("L1", "Another hammer", "Tools", None, None),
		})
		.await;

	assert!(matches!(duplicate, Err(Error::Conflict { .. })));

	let invalid = service
		.add_line(AddLineRequest {
			catalogue_uuid: uuid,
			line: CatalogueLine {
				line_id: String::new(),
				manufacturer_item_id: None,
				manufacturer_party_id: "P2".to_string(),
				item_name: String::new(),
				price_amount: None,
				classifications: Vec::new(),
				texts: Vec::new(),
			},
		})
		.await;
	let Err(Error::InvalidLine { messages }) = invalid else {
		panic!("Expected an InvalidLine error.");
	};

	assert!(messages.len() > 1, "Every failed check must be reported, got: {messages:?}");

	let fetched = service
		.get_line(LineFetchRequest { catalogue_uuid: uuid, line_id: "L1".to_string() })
		.await
		.expect("Fetch must succeed.")
		.expect("Line L1 must exist.");

	assert_eq!(fetched.item_name, "Claw hammer");

	let mut changed = line("L1", "Framing hammer", "Tools", Some(12.5), None);

	changed.price_amount = Some(12.5);
	service
		.update_line(UpdateLineRequest { catalogue_uuid: uuid, line: changed })
		.await
		.expect("Update must succeed.");

	let updated = service
		.get_line(LineFetchRequest { catalogue_uuid: uuid, line_id: "L1".to_string() })
		.await
		.expect("Fetch must succeed.")
		.expect("Line L1 must exist.");

	assert_eq!(updated.item_name, "Framing hammer");
	assert_eq!(updated.price_amount, Some(12.5));

	let deleted = service
		.delete_line(DeleteLineRequest { catalogue_uuid: uuid, line_id: "L1".to_string() })
		.await
		.expect("Delete must succeed.");

	assert!(deleted.removed);

	let gone = service
		.get_line(LineFetchRequest { catalogue_uuid: uuid, line_id: "L1".to_string() })
		.await
		.expect("Fetch must succeed.");

	assert!(gone.is_none());

	let missing_catalogue = service
		.get_line(LineFetchRequest { catalogue_uuid: Uuid::new_v4(), line_id: "L1".to_string() })
		.await;

	assert!(matches!(missing_catalogue, Err(Error::NotFound { .. })));

	let page = service.browse_lines(browse("C1", "P1")).await.expect("Browse must succeed.");

	assert_eq!(page.total_size, 4, "The deleted line must leave the total.");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
