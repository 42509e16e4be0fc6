pub mod csv_server;
