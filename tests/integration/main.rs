mod postgres_tests;
