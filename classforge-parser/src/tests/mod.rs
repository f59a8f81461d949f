mod test_constructors;
