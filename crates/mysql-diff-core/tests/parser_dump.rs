//! Tests for whole-dump parsing.

use mysql_diff_core::ast::{IndexKind, Nullability};
use mysql_diff_core::{ErrorPolicy, parse_dump, parse_dump_with};

const DUMP: &str = r"-- MySQL dump 10.13  Distrib 8.0.36, for Linux (x86_64)
--
-- Host: localhost    Database: shop
/*!40101 SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT */;
/*!50503 SET NAMES utf8mb4 */;
/*!40014 SET @OLD_FOREIGN_KEY_CHECKS=@@FOREIGN_KEY_CHECKS, FOREIGN_KEY_CHECKS=0 */;

--
-- Table structure for table `users`
--

DROP TABLE IF EXISTS `users`;
/*!40101 SET @saved_cs_client     = @@character_set_client */;
/*!50503 SET character_set_client = utf8mb4 */;
CREATE TABLE `users` (
  `id` int unsigned NOT NULL AUTO_INCREMENT,
  `email` varchar(255) NOT NULL,
  `name` varchar(100) DEFAULT NULL,
  `created_at` timestamp NULL DEFAULT CURRENT_TIMESTAMP,
  PRIMARY KEY (`id`),
  UNIQUE KEY `uk_email` (`email`)
) ENGINE=InnoDB AUTO_INCREMENT=42 DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci;
/*!40101 SET character_set_client = @saved_cs_client */;

LOCK TABLES `users` WRITE;
/*!40000 ALTER TABLE `users` DISABLE KEYS */;
INSERT INTO `users` VALUES (1,'a@example.com','CREATE TABLE in a string','2024-01-01 00:00:00');
/*!40000 ALTER TABLE `users` ENABLE KEYS */;
UNLOCK TABLES;

DROP TABLE IF EXISTS `orders`;
CREATE TABLE `orders` (
  `id` int NOT NULL,
  `user_id` int unsigned NOT NULL,
  PRIMARY KEY (`id`),
  KEY `fk_orders_user` (`user_id`),
  CONSTRAINT `fk_orders_user` FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) ON DELETE CASCADE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;
/*!40014 SET FOREIGN_KEY_CHECKS=@OLD_FOREIGN_KEY_CHECKS */;
";

#[test]
fn test_mysqldump_output() {
    let tables: Vec<_> = parse_dump(DUMP).collect::<Result<_, _>>().unwrap();
    assert_eq!(tables.len(), 2);

    let users = &tables[0];
    assert_eq!(users.name, "users");
    assert_eq!(users.columns.len(), 4);
    assert_eq!(users.columns[0].data_type.to_string(), "INT UNSIGNED");
    assert!(users.columns[0].auto_increment);
    assert_eq!(users.columns[3].nullability, Nullability::Null);
    assert_eq!(
        users.columns[3].default_value.as_deref(),
        Some("CURRENT_TIMESTAMP")
    );
    assert_eq!(
        users.primary_key.as_ref().map(|pk| pk.column_names()),
        Some(vec!["id".to_string()])
    );
    assert_eq!(users.indexes[0].kind, IndexKind::Unique);
    let options = users.table_options.as_ref().unwrap();
    assert_eq!(options.auto_increment, Some(42));
    assert_eq!(options.character_set.as_deref(), Some("utf8mb4"));

    let orders = &tables[1];
    assert_eq!(orders.name, "orders");
    assert_eq!(orders.indexes.len(), 1);
    assert_eq!(orders.foreign_keys.len(), 1);
    assert_eq!(orders.foreign_keys[0].reference.table, "users");
}

#[test]
fn test_only_create_table_statements_yield_tables() {
    let sql = "SET FOREIGN_KEY_CHECKS=0;\nCREATE TABLE t (id INT);\nSET FOREIGN_KEY_CHECKS=1;";
    let tables: Vec<_> = parse_dump(sql).collect::<Result<_, _>>().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "t");
}

#[test]
fn test_statements_without_semicolons() {
    let sql = "CREATE TABLE a (id INT)\nCREATE TABLE b (id INT)";
    let names: Vec<_> = parse_dump(sql).map(|t| t.unwrap().name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_other_create_statements_ignored() {
    let sql = "CREATE DATABASE shop; CREATE VIEW v AS SELECT 1; CREATE TABLE t (id INT);";
    let tables = parse_dump_with(sql, ErrorPolicy::Abort).unwrap();
    assert_eq!(tables.len(), 1);
}

#[test]
fn test_parse_is_lazy() {
    let sql = "CREATE TABLE good (id INT); CREATE TABLE bad (id);";
    let mut tables = parse_dump(sql);
    assert_eq!(tables.next().unwrap().unwrap().name, "good");
    assert!(tables.next().unwrap().is_err());
    assert!(tables.next().is_none());
}

#[test]
fn test_abort_policy_returns_first_error() {
    let sql = "CREATE TABLE a (id INT);\nCREATE TABLE b (id BOGUS);\nCREATE TABLE c (id);";
    let err = parse_dump_with(sql, ErrorPolicy::Abort).unwrap_err();
    assert_eq!(err.line(), 2);
    assert_eq!(err.text, "BOGUS");
}

#[test]
fn test_skip_policy_keeps_good_tables() {
    let sql = "CREATE TABLE a (id INT);\nCREATE TABLE b (id BOGUS);\nCREATE TABLE c (id INT);";
    let tables = parse_dump_with(sql, ErrorPolicy::Skip).unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);
}

#[test]
fn test_empty_dump() {
    assert_eq!(parse_dump("").count(), 0);
    assert_eq!(parse_dump("-- nothing here\n/*!40101 SET NAMES utf8 */;").count(), 0);
}
