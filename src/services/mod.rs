pub mod ip_service;
