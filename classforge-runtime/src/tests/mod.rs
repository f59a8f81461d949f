mod test_factory;
